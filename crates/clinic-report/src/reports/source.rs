use super::document::{JobDocument, LoadError};
use super::variant::ReportConfig;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use tracing::{error, info};

/// Where report datasets come from. Implementations fetch raw bytes; parsing is shared.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, asset: &str) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Reads datasets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    root: PathBuf,
}

impl FsDocumentSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Joins `asset` under the root, refusing absolute paths and `..` segments.
    pub fn resolve(&self, asset: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(asset);
        let escapes = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if asset.is_empty() || escapes {
            return Err(LoadError::InvalidAsset(asset.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl DocumentSource for FsDocumentSource {
    async fn fetch(&self, asset: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(asset)?;
        tokio::fs::read(&path).await.map_err(|source| LoadError::Io {
            asset: path.display().to_string(),
            source,
        })
    }
}

/// Fetches and parses the dataset for `config`. One attempt, no retry.
pub async fn load_document<S: DocumentSource>(
    source: &S,
    config: &ReportConfig,
) -> Result<JobDocument, LoadError> {
    let result = source
        .fetch(config.asset)
        .await
        .and_then(|bytes| JobDocument::from_slice(&bytes, config.employment));

    match &result {
        Ok(document) => info!(
            variant = %config.variant,
            asset = config.asset,
            categories = document.categories().len(),
            "report dataset loaded"
        ),
        Err(err) => error!(
            variant = %config.variant,
            asset = config.asset,
            error = %err,
            "report dataset failed to load"
        ),
    }

    result
}
