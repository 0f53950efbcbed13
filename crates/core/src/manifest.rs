//! Image manifest describing the available screenshots.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use walkdir::WalkDir;

use crate::catalog::Catalog;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Raw manifest record. Accepts either `"name.jpg"` or `{"filename": "name.jpg"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Screenshot filename relative to the asset root.
    pub filename: String,
}

impl CatalogEntry {
    /// Build an entry from a filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

impl<'de> Deserialize<'de> for CatalogEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Record { filename: String },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(filename) | Raw::Record { filename } => Self { filename },
        })
    }
}

/// Contents of `imageData.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageManifest {
    /// Every listed screenshot.
    #[serde(default)]
    pub images: Vec<CatalogEntry>,
}

impl ImageManifest {
    /// Parse a manifest document.
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("failed to parse image manifest")
    }

    /// Build a manifest by walking a directory for image files.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            anyhow::bail!("asset directory {} does not exist", root.display());
        }

        let mut images = Vec::new();
        for entry in WalkDir::new(root).max_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_image = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if !is_image {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                images.push(CatalogEntry::new(name));
            }
        }

        Ok(Self { images })
    }
}

/// Where the manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document served over HTTP(S).
    Remote(String),
    /// No manifest: list image files in this directory.
    Directory(PathBuf),
}

impl ManifestSource {
    /// Interpret a configured location. URLs become [`ManifestSource::Remote`].
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if is_url(location) {
            Self::Remote(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Fetch and parse the manifest, then build the catalog.
    pub async fn load(&self, client: &reqwest::Client) -> Result<Catalog> {
        let manifest = match self {
            Self::File(path) => {
                let contents = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read manifest {}", path.display()))?;
                ImageManifest::from_json(&contents)
                    .with_context(|| format!("invalid manifest {}", path.display()))?
            }
            Self::Remote(url) => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("failed to fetch manifest {url}"))?
                    .error_for_status()
                    .with_context(|| format!("manifest request to {url} failed"))?;
                let contents = response
                    .text()
                    .await
                    .with_context(|| format!("failed to read manifest body from {url}"))?;
                ImageManifest::from_json(&contents)
                    .with_context(|| format!("invalid manifest {url}"))?
            }
            Self::Directory(root) => ImageManifest::discover(root)?,
        };

        let catalog = Catalog::from_entries(manifest.images);
        info!(
            images = catalog.len(),
            rejected = catalog.rejected().len(),
            sites = catalog.playable_sites(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

pub(crate) fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
