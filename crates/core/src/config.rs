//! Application configuration.
//!
//! Values are layered: built-in defaults, then
//! `<config_dir>/phishgame/config.toml`, then `PHISHGAME__*` environment
//! variables (`PHISHGAME__SUBMISSION__BOT_TOKEN`, `PHISHGAME__ROUND__SEED`, ...).

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    assets::AssetSource,
    manifest::{self, ManifestSource},
    round::DEFAULT_ROUND_SECONDS,
};

/// Directory under the user config dir that holds `config.toml`.
pub const CONFIG_DIR_NAME: &str = "phishgame";

const ENV_PREFIX: &str = "PHISHGAME";

const DEFAULT_CONFIG: &str = r#"# phishgame configuration

[catalog]
# JSON manifest listing the screenshots ({"images": [...]}); a path or an http(s) URL.
# Leave unset to scan the asset directory instead.
# manifest = "public/imageData.json"
# Directory or http(s) base URL the screenshots are served from.
assets = "public/images"
# Seconds before a manifest or screenshot request is abandoned.
timeout_secs = 15

[round]
seconds = 6
# Fixed seed for reproducible sessions.
# seed = 42

[submission]
api_base = "https://api.telegram.org"
timeout_secs = 10
# Keep credentials out of version control; prefer
# PHISHGAME__SUBMISSION__BOT_TOKEN and PHISHGAME__SUBMISSION__CHAT_ID.
# bot_token = ""
# chat_id = ""

[viewer]
# Command used to open a screenshot; the file path is appended.
# command = "xdg-open"
"#;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Manifest and asset locations.
    pub catalog: CatalogConfig,
    /// Round timing and randomness.
    pub round: RoundConfig,
    /// Result delivery endpoint.
    pub submission: SubmissionConfig,
    /// External image viewer.
    pub viewer: ViewerConfig,
}

/// Where screenshots and their manifest live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Manifest path or URL. `None` scans `assets` when it is a directory.
    pub manifest: Option<String>,
    /// Asset directory or base URL.
    pub assets: String,
    /// Deadline in seconds for manifest and screenshot loads.
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            assets: "public/images".to_string(),
            timeout_secs: 15,
        }
    }
}

impl CatalogConfig {
    /// Resolve the manifest location.
    pub fn manifest_source(&self) -> Result<ManifestSource> {
        match self.manifest.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => Ok(ManifestSource::parse(location)),
            _ if manifest::is_url(self.assets.trim()) => anyhow::bail!(
                "catalog.manifest is required when assets are served from {}",
                self.assets
            ),
            _ => Ok(ManifestSource::Directory(PathBuf::from(self.assets.trim()))),
        }
    }

    /// Resolve the asset location.
    pub fn asset_source(&self) -> AssetSource {
        AssetSource::parse(&self.assets)
    }

    /// Load deadline, at least one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Round settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Seconds per round.
    pub seconds: u32,
    /// Optional RNG seed.
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            seconds: DEFAULT_ROUND_SECONDS,
            seed: None,
        }
    }
}

/// Messaging endpoint for finished games.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Bot API base URL.
    pub api_base: String,
    /// Bot token; never committed.
    pub bot_token: Option<String>,
    /// Destination chat.
    pub chat_id: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            bot_token: None,
            chat_id: None,
            timeout_secs: 10,
        }
    }
}

impl SubmissionConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// External viewer used to look at screenshots from the terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Program to launch with the screenshot path.
    pub command: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let command = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        Self {
            command: command.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location plus environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load configuration from an explicit file plus environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }
}

/// `<config_dir>/phishgame/config.toml`, falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join("config.toml")
}

/// Write a commented template to the default location if none exists.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(default_config_path())
}

fn ensure_config_at(path: PathBuf) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_round_trips_through_loader() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("phishgame").join("config.toml");
        ensure_config_at(path.clone())?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.round.seconds, DEFAULT_ROUND_SECONDS);
        assert_eq!(config.catalog.assets, "public/images");
        assert_eq!(config.catalog.timeout(), Duration::from_secs(15));
        assert_eq!(config.submission.api_base, "https://api.telegram.org");
        assert!(config.submission.bot_token.is_none());
        Ok(())
    }

    #[test]
    fn existing_file_is_left_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[round]\nseconds = 9\nseed = 5\n")?;
        ensure_config_at(path.clone())?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.round.seconds, 9);
        assert_eq!(config.round.seed, Some(5));
        Ok(())
    }

    #[test]
    fn resolves_sources() -> Result<()> {
        let local = CatalogConfig::default();
        assert_eq!(
            local.manifest_source()?,
            ManifestSource::Directory(PathBuf::from("public/images"))
        );

        let remote = CatalogConfig {
            manifest: None,
            assets: "https://cdn.example.com/images".to_string(),
            ..CatalogConfig::default()
        };
        assert!(remote.manifest_source().is_err());

        let explicit = CatalogConfig {
            manifest: Some("https://cdn.example.com/imageData.json".to_string()),
            assets: "https://cdn.example.com/images".to_string(),
            ..CatalogConfig::default()
        };
        assert_eq!(
            explicit.manifest_source()?,
            ManifestSource::Remote("https://cdn.example.com/imageData.json".to_string())
        );
        Ok(())
    }
}
