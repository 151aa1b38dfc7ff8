//! Runner configuration.

use crate::config::{ApiToken, ConfigError, FeedConfig};
use std::path::{Path, PathBuf};

/// Configuration for a feed run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Values loaded from `feed.toml`, with command line overrides applied.
    feed: FeedConfig,
    /// File the feed configuration was loaded from, named in validation errors.
    config_path: PathBuf,
    /// GitHub token, if one was found.
    token: Option<ApiToken>,
    /// Whether downloaded images are committed after the run.
    commit_images: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    #[must_use]
    pub fn new(feed: FeedConfig, token: Option<ApiToken>) -> Self {
        Self {
            feed,
            config_path: PathBuf::from("feed.toml"),
            token,
            commit_images: false,
        }
    }

    /// Sets the file the feed configuration came from.
    #[must_use]
    pub fn with_config_path(mut self, config_path: PathBuf) -> Self {
        self.config_path = config_path;
        self
    }

    /// Overrides the target document.
    #[must_use]
    pub fn with_document(mut self, document: PathBuf) -> Self {
        self.feed.document = document;
        self
    }

    /// Overrides the account used for the public listing.
    #[must_use]
    pub fn with_account(mut self, account: String) -> Self {
        self.feed.account = Some(account);
        self
    }

    /// Enables committing downloaded images.
    #[must_use]
    pub fn with_commit_images(mut self, commit_images: bool) -> Self {
        self.commit_images = commit_images;
        self
    }

    /// Returns the feed configuration.
    #[must_use]
    pub fn feed(&self) -> &FeedConfig {
        &self.feed
    }

    /// Returns the target document path.
    #[must_use]
    pub fn document_path(&self) -> &Path {
        &self.feed.document
    }

    /// Returns the directory containing the document.
    ///
    /// Asset paths and git commands are relative to it.
    #[must_use]
    pub fn site_root(&self) -> &Path {
        match self.feed.document.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Returns the GitHub token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&ApiToken> {
        self.token.as_ref()
    }

    /// Returns whether downloaded images are committed.
    #[must_use]
    pub fn commit_images(&self) -> bool {
        self.commit_images
    }

    /// Validates the feed configuration with all overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.feed.validate(&self.config_path)
    }
}
