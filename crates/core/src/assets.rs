//! Screenshot retrieval and the preload gate.
//!
//! A pair only becomes visible once both screenshots are confirmed
//! loadable. Remote screenshots are cached on disk so a local viewer can
//! open them.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{debug, warn};

use crate::{error::AssetLoadError, manifest, round::Pair};

/// Sub-directory of the user cache dir used for downloaded screenshots.
pub const CACHE_DIR_NAME: &str = "phishgame/images";

/// Deadline for a single screenshot unless overridden.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Where screenshots are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Local directory.
    Directory(PathBuf),
    /// HTTP(S) base URL; the filename is appended.
    Remote(String),
}

impl AssetSource {
    /// Interpret a configured location. URLs become [`AssetSource::Remote`].
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if manifest::is_url(location) {
            Self::Remote(location.trim_end_matches('/').to_string())
        } else {
            Self::Directory(PathBuf::from(location))
        }
    }
}

/// Local files for both screenshots of a pair, left first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadedPair {
    /// Paths ready to hand to a viewer.
    pub paths: [PathBuf; 2],
}

/// Loads screenshots from an [`AssetSource`].
#[derive(Debug, Clone)]
pub struct AssetStore {
    source: AssetSource,
    client: reqwest::Client,
    cache_dir: PathBuf,
    timeout: Duration,
}

impl AssetStore {
    /// Create a store caching downloads under the user cache directory.
    pub fn new(source: AssetSource, client: reqwest::Client) -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(CACHE_DIR_NAME);
        Self {
            source,
            client,
            cache_dir,
            timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Override the download cache directory.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Give up on a screenshot after `timeout`, so a stalled server fails the preload.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured source.
    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    /// Load both screenshots concurrently. The first failure aborts the preload.
    pub async fn preload(&self, pair: &Pair) -> Result<PreloadedPair, AssetLoadError> {
        let [left, right] = pair.filenames();
        let (left, right) = tokio::try_join!(self.load(left), self.load(right))?;
        Ok(PreloadedPair {
            paths: [left, right],
        })
    }

    /// Confirm a single screenshot is loadable and return its local path.
    pub async fn load(&self, filename: &str) -> Result<PathBuf, AssetLoadError> {
        if !is_plain_name(filename) {
            return Err(AssetLoadError::InvalidName(filename.to_string()));
        }
        let fetch = async {
            match &self.source {
                AssetSource::Directory(root) => check_file(&root.join(filename)).await,
                AssetSource::Remote(base) => self.download(base, filename).await,
            }
        };
        let result = tokio::time::timeout(self.timeout, fetch)
            .await
            .unwrap_or_else(|_| Err(format!("timed out after {:?}", self.timeout)));
        match result {
            Ok(path) => {
                debug!(filename, path = %path.display(), "Asset ready");
                Ok(path)
            }
            Err(reason) => {
                warn!(filename, %reason, "Asset failed to load");
                Err(AssetLoadError::Unavailable {
                    filename: filename.to_string(),
                    reason,
                })
            }
        }
    }

    async fn download(&self, base: &str, filename: &str) -> Result<PathBuf, String> {
        let url = format!("{base}/{filename}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| err.to_string())?
            .error_for_status()
            .map_err(|err| err.to_string())?;
        let bytes = response.bytes().await.map_err(|err| err.to_string())?;
        if bytes.is_empty() {
            return Err("empty response".to_string());
        }

        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|err| format!("cannot create {}: {err}", self.cache_dir.display()))?;
        let path = self.cache_dir.join(filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|err| format!("cannot write {}: {err}", path.display()))?;
        Ok(path)
    }
}

async fn check_file(path: &Path) -> Result<PathBuf, String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|err| format!("{}: {err}", path.display()))?;
    if !metadata.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    if metadata.len() == 0 {
        return Err(format!("{} is empty", path.display()));
    }
    Ok(path.to_path_buf())
}

fn is_plain_name(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
        && !filename.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Image;
    use axum::{http::StatusCode, routing::get, Router};
    use std::fs;
    use tempfile::tempdir;

    fn pair() -> Pair {
        Pair::new(
            Image::parse("real_naver_easy.jpg").unwrap(),
            Image::parse("fake_naver_easy.jpg").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn preloads_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("real_naver_easy.jpg"), b"real").unwrap();
        fs::write(dir.path().join("fake_naver_easy.jpg"), b"fake").unwrap();

        let store = AssetStore::new(
            AssetSource::Directory(dir.path().to_path_buf()),
            reqwest::Client::new(),
        );
        let loaded = store.preload(&pair()).await.unwrap();
        assert_eq!(loaded.paths[0], dir.path().join("real_naver_easy.jpg"));
        assert_eq!(loaded.paths[1], dir.path().join("fake_naver_easy.jpg"));
    }

    #[tokio::test]
    async fn missing_or_empty_file_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("real_naver_easy.jpg"), b"").unwrap();

        let store = AssetStore::new(
            AssetSource::Directory(dir.path().to_path_buf()),
            reqwest::Client::new(),
        );
        let err = store.preload(&pair()).await.unwrap_err();
        assert!(matches!(err, AssetLoadError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn refuses_path_traversal() {
        let store = AssetStore::new(
            AssetSource::Directory(PathBuf::from(".")),
            reqwest::Client::new(),
        );
        let err = store.load("../secret.jpg").await.unwrap_err();
        assert!(matches!(err, AssetLoadError::InvalidName(_)));
    }

    #[tokio::test]
    async fn downloads_remote_assets_into_cache() {
        let router = Router::new()
            .route("/images/real_naver_easy.jpg", get(|| async { "real-bytes" }))
            .route(
                "/images/fake_naver_easy.jpg",
                get(|| async { (StatusCode::NOT_FOUND, "") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let cache = tempdir().unwrap();
        let store = AssetStore::new(
            AssetSource::parse(&format!("http://{addr}/images/")),
            reqwest::Client::new(),
        )
        .with_cache_dir(cache.path());

        let path = store.load("real_naver_easy.jpg").await.unwrap();
        assert_eq!(fs::read(path).unwrap(), b"real-bytes");

        let err = store.preload(&pair()).await.unwrap_err();
        let AssetLoadError::Unavailable { filename, .. } = &err else {
            panic!("expected an unavailable asset, got {err:?}");
        };
        assert_eq!(filename, "fake_naver_easy.jpg");
    }

    #[tokio::test]
    async fn stalled_server_fails_preload() {
        let router = Router::new().route(
            "/images/:name",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "too late"
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let cache = tempdir().unwrap();
        let store = AssetStore::new(
            AssetSource::parse(&format!("http://{addr}/images")),
            reqwest::Client::new(),
        )
        .with_cache_dir(cache.path())
        .with_timeout(Duration::from_millis(200));

        let err = store.preload(&pair()).await.unwrap_err();
        let AssetLoadError::Unavailable { reason, .. } = &err else {
            panic!("expected an unavailable asset, got {err:?}");
        };
        assert!(reason.contains("timed out"), "{reason}");
    }

    #[test]
    fn parses_sources() {
        assert_eq!(
            AssetSource::parse("https://cdn.example.com/images/"),
            AssetSource::Remote("https://cdn.example.com/images".to_string())
        );
        assert_eq!(
            AssetSource::parse("public/images"),
            AssetSource::Directory(PathBuf::from("public/images"))
        );
    }
}
