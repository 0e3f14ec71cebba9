//! Playback side effects: hand direct media to mpv, page URLs to the browser.
//!
//! Both are fire-and-forget. The UI never waits on a player process.

use std::process::Stdio;

use cinema_core::config::PlayerConfig;
use cinema_core::{classify_playability, Entry, Playability};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("entry has no source URL")]
    NoUrl,
    #[error("could not start {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not open browser: {0}")]
    Browser(#[source] std::io::Error),
}

/// What a play request turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum Launched {
    Player { mime: &'static str },
    Browser,
}

/// Play an entry inline when its source is direct media, otherwise open
/// it in the browser.
pub fn play(entry: &Entry, config: &PlayerConfig) -> Result<Launched, PlayerError> {
    let url = entry.url.as_deref().ok_or(PlayerError::NoUrl)?;
    match classify_playability(Some(url)) {
        Playability::DirectMedia(hint) => {
            spawn_player(url, config)?;
            Ok(Launched::Player {
                mime: hint.mime_type(),
            })
        }
        Playability::ExternalLink => {
            open_external(url)?;
            Ok(Launched::Browser)
        }
    }
}

pub fn open_external(url: &str) -> Result<(), PlayerError> {
    if url.trim().is_empty() {
        return Err(PlayerError::NoUrl);
    }
    info!("opening in browser: {}", url);
    webbrowser::open(url).map_err(PlayerError::Browser)
}

fn spawn_player(url: &str, config: &PlayerConfig) -> Result<(), PlayerError> {
    info!("launching {} for {}", config.mpv_binary, url);
    let mut child = tokio::process::Command::new(&config.mpv_binary)
        .args(&config.extra_args)
        .arg("--force-window=yes")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| PlayerError::Spawn {
            binary: config.mpv_binary.clone(),
            source,
        })?;

    // Reap the process in the background so it never blocks the UI.
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if !status.success() => warn!("player exited with {}", status),
            Ok(_) => {}
            Err(e) => warn!("player wait failed: {}", e),
        }
    });
    Ok(())
}
