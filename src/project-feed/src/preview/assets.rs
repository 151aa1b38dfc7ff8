//! Local storage for preview images downloaded from private repositories.

use crate::listing::RepositorySummary;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while storing a downloaded image.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Failed to create the asset directory or write the file.
    #[error("Failed to write '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Image files written or reused during a run.
///
/// Returned to the caller so it can decide which files to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadedImages {
    paths: BTreeSet<PathBuf>,
}

impl DownloadedImages {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a local image path. Returns false if it was already recorded.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    /// Number of recorded images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if nothing was downloaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterates over recorded paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

/// Where downloaded images live on disk and how the page refers to them.
#[derive(Debug, Clone)]
pub struct AssetStore {
    site_root: PathBuf,
    asset_dir: PathBuf,
}

impl AssetStore {
    /// `asset_dir` is relative to `site_root`, the directory holding the document.
    pub fn new(site_root: impl Into<PathBuf>, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            asset_dir: asset_dir.into(),
        }
    }

    /// Returns the file system path of an asset file.
    #[must_use]
    pub fn local_path(&self, file_name: &str) -> PathBuf {
        self.site_root.join(&self.asset_dir).join(file_name)
    }

    /// Returns the site-absolute URL path of an asset file (e.g. `/assets/x.png`).
    #[must_use]
    pub fn public_src(&self, file_name: &str) -> String {
        let mut src = String::new();
        for component in self.asset_dir.components() {
            if let Component::Normal(part) = component {
                src.push('/');
                src.push_str(&part.to_string_lossy());
            }
        }
        src.push('/');
        src.push_str(file_name);
        src
    }

    /// Writes an image, creating the asset directory when needed.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if the directory or file can't be written.
    pub fn store(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, AssetError> {
        let path = self.local_path(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AssetError::IoError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(&path, bytes).map_err(|e| AssetError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }
}

/// Derives a stable file name for an image of a repository.
///
/// Format: `{owner}_{name}_{basename}` with the basename lowercased and spaces
/// replaced by underscores, so re-runs overwrite the same file.
#[must_use]
pub fn local_file_name(repository: &RepositorySummary, image_path: &str) -> String {
    let repo_part = format!("{}_{}", repository.owner, repository.name).replace('/', "_");
    let without_query = image_path.split(['?', '#']).next().unwrap_or(image_path);
    let basename = without_query
        .rsplit('/')
        .next()
        .unwrap_or(without_query);
    let image_part = basename
        .replace("%20", "_")
        .replace(' ', "_")
        .to_lowercase();

    format!("{repo_part}_{image_part}")
}
