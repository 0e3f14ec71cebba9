mod action;
mod app;
mod app_state;
mod component;
mod components;
mod player;
mod theme;
mod widgets;

use clap::Parser;

use cinema_core::config::Config;
use cinema_core::{platform, CatalogSource};

/// Terminal browser for a JSON video catalog.
#[derive(Debug, Parser)]
#[command(name = "cinema", version)]
struct Args {
    /// Catalog source: http(s) URL or local JSON file (overrides config).
    #[arg(short, long)]
    source: Option<String>,

    /// Entries per page (overrides config).
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Open the watch view for an id, index, or `watch.html?id=…` link.
    /// Bare ids are taken literally; link values are URL-decoded.
    #[arg(short, long)]
    watch: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("cinema.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals quiet by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("cinema log: {}", log_path.display());

    tracing::info!("cinema starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        Config::default()
    });

    let source = CatalogSource::parse(args.source.as_deref().unwrap_or(&config.catalog.source));
    let page_size = match args.page_size {
        Some(0) | None => config.catalog.effective_page_size(),
        Some(n) => n,
    };
    tracing::info!("source={} page_size={}", source, page_size);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(config, source, page_size, args.watch);
    app.run().await?;

    Ok(())
}
