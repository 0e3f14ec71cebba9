use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

/// Page size used when the config or CLI does not provide a usable one.
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Number of "related" entries shown next to the player.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Where the entry list comes from and how it is paged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL (http/https) or local path of the JSON entry list.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
    /// Prefix for share links; the entry identifier is appended as `?id=`.
    #[serde(default = "default_share_base")]
    pub share_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Media player used for direct media URLs.
    #[serde(default = "default_mpv_binary")]
    pub mpv_binary: String,
    /// Extra arguments passed before the URL.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            page_size: default_page_size(),
            recommendation_limit: default_recommendation_limit(),
            share_base: default_share_base(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mpv_binary: default_mpv_binary(),
            extra_args: Vec::new(),
        }
    }
}

fn default_source() -> String {
    // A movies.json shipped beside the executable wins over the working directory
    if let Some(dir) = platform::exe_dir() {
        let beside = dir.join("movies.json");
        if beside.exists() {
            return beside.display().to_string();
        }
    }
    "movies.json".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_recommendation_limit() -> usize {
    DEFAULT_RECOMMENDATION_LIMIT
}

fn default_share_base() -> String {
    "watch.html".to_string()
}

fn default_mpv_binary() -> String {
    "mpv".to_string()
}

impl CatalogConfig {
    /// Page size with a zero value replaced by the default.
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            tracing::warn!("page_size of 0 is invalid, using {}", DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.recommendation_limit, 20);
        assert_eq!(config.catalog.share_base, "watch.html");
        assert!(config.catalog.source.ends_with("movies.json"));
        assert_eq!(config.player.mpv_binary, "mpv");
        assert!(config.player.extra_args.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml_str(
            r#"
            [catalog]
            source = "https://example.com/movies.json"
            page_size = 24
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.source, "https://example.com/movies.json");
        assert_eq!(config.catalog.page_size, 24);
        assert_eq!(config.catalog.recommendation_limit, 20);
        assert_eq!(config.player.mpv_binary, "mpv");
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let catalog = CatalogConfig {
            page_size: 0,
            ..CatalogConfig::default()
        };
        assert_eq!(catalog.effective_page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = Config::default();
        config.player.extra_args = vec!["--fs".to_string()];
        let text = toml::to_string_pretty(&config).unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back.player.extra_args, vec!["--fs".to_string()]);
    }
}
