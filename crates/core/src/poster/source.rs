//! Where poster paths come from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::types::PosterError;

/// A listing of every poster available to the resolver.
#[async_trait]
pub trait PosterSource: Send + Sync {
    /// Short name for logs and status output.
    fn name(&self) -> &str;

    /// List every poster path. Order is preserved by the cache.
    async fn list(&self) -> Result<Vec<String>, PosterError>;
}

/// Posters stored as files under a local directory.
///
/// Each file is reported as `{base_url}{relative/path}`, sorted
/// lexicographically by relative path the way an object store lists keys.
#[derive(Debug, Clone)]
pub struct DirectoryPosterSource {
    root: PathBuf,
    base_url: String,
}

impl DirectoryPosterSource {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn walk(&self) -> Result<Vec<String>, PosterError> {
        let mut relative_paths = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name();
                if name.to_string_lossy().starts_with('.') {
                    continue;
                }

                let file_type = entry.file_type().await?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() {
                    if let Some(rel) = relative_key(&self.root, &path) {
                        relative_paths.push(rel);
                    }
                }
            }
        }

        relative_paths.sort();
        Ok(relative_paths
            .into_iter()
            .map(|rel| format!("{}{}", self.base_url, rel))
            .collect())
    }
}

/// `/`-separated path of `path` relative to `root`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[async_trait]
impl PosterSource for DirectoryPosterSource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn list(&self) -> Result<Vec<String>, PosterError> {
        let paths = self.walk().await.map_err(|e| PosterError::Listing {
            source_name: format!("directory {}", self.root.display()),
            message: e.to_string(),
        })?;
        debug!(root = %self.root.display(), count = paths.len(), "Listed poster directory");
        Ok(paths)
    }
}

/// A fixed list of poster URLs, typically from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticPosterSource {
    urls: Vec<String>,
}

impl StaticPosterSource {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl PosterSource for StaticPosterSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn list(&self) -> Result<Vec<String>, PosterError> {
        Ok(self.urls.clone())
    }
}
