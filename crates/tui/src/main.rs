mod app;
mod input;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use phishgame_core::{
    config::{self, AppConfig},
    AssetStore, GameRng, TelegramNotifier,
};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let client = reqwest::Client::builder()
        .timeout(config.catalog.timeout())
        .build()?;
    let catalog = match config.catalog.manifest_source() {
        Ok(source) => source.load(&client).await,
        Err(err) => Err(err),
    };
    if let Err(err) = &catalog {
        tracing::error!("Catalog load failed: {err:#}");
    }

    let rng = config
        .round
        .seed
        .map(GameRng::new)
        .unwrap_or_else(GameRng::from_entropy);
    let assets = AssetStore::new(config.catalog.asset_source(), client)
        .with_timeout(config.catalog.timeout());
    let notifier = TelegramNotifier::from_config(&config.submission)?;

    let mut app = app::PhishApp::new(catalog, rng, &config, assets, notifier);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("phishgame.log");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the terminal UI, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
