//! Feed configuration deserialization.

use crate::config::ConfigError;
use crate::document::{DocumentMarkers, DEFAULT_END_MARKER, DEFAULT_START_MARKER};
use crate::selection::SelectionPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parsed contents of a `feed.toml` file.
///
/// Every key is optional; a missing file yields [`FeedConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FeedConfig {
    /// Account whose public repositories are listed when authenticated listing fails.
    #[serde(default)]
    pub account: Option<String>,

    /// HTML document containing the projects markers.
    #[serde(default = "default_document")]
    pub document: PathBuf,

    /// Directory for downloaded preview images, relative to the document's directory.
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// Image used when no other preview source succeeds.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Maximum number of rendered projects.
    #[serde(default = "default_max_projects")]
    pub max_projects: usize,

    /// Maximum number of organization-owned projects, placed first.
    #[serde(default = "default_organization_cap")]
    pub organization_cap: usize,

    /// Repository names (or `owner/name`) that are never rendered.
    #[serde(default)]
    pub excluded_repositories: Vec<String>,

    /// Target of the "more projects" link. Derived from `account` when unset.
    #[serde(default)]
    pub more_projects_url: Option<String>,

    /// Label written in front of the footer date.
    #[serde(default = "default_last_updated_label")]
    pub last_updated_label: String,

    /// Comment opening the generated region.
    #[serde(default = "default_start_marker")]
    pub start_marker: String,

    /// Comment closing the generated region.
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

pub(crate) fn default_document() -> PathBuf {
    PathBuf::from("index.html")
}

pub(crate) fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets/project-images")
}

pub(crate) fn default_placeholder_image() -> String {
    "./assets/css/images/icon.png".to_string()
}

pub(crate) fn default_max_projects() -> usize {
    4
}

pub(crate) fn default_organization_cap() -> usize {
    2
}

pub(crate) fn default_last_updated_label() -> String {
    "Última atualização".to_string()
}

pub(crate) fn default_start_marker() -> String {
    DEFAULT_START_MARKER.to_string()
}

pub(crate) fn default_end_marker() -> String {
    DEFAULT_END_MARKER.to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            account: None,
            document: default_document(),
            asset_dir: default_asset_dir(),
            placeholder_image: default_placeholder_image(),
            max_projects: default_max_projects(),
            organization_cap: default_organization_cap(),
            excluded_repositories: Vec::new(),
            more_projects_url: None,
            last_updated_label: default_last_updated_label(),
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

impl FeedConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file can't be read, isn't valid TOML,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        Ok(config)
    }

    /// Loads a configuration file, falling back to defaults when it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No feed configuration found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validates value ranges and marker shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: &str| {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: message.to_string(),
            })
        };

        if self.document.as_os_str().is_empty() {
            return fail("document cannot be empty");
        }
        if self.max_projects == 0 {
            return fail("max-projects must be at least 1");
        }
        if self.start_marker.trim().is_empty() || self.end_marker.trim().is_empty() {
            return fail("start-marker and end-marker cannot be empty");
        }
        if self.start_marker.contains(&self.end_marker)
            || self.end_marker.contains(&self.start_marker)
        {
            return fail("start-marker and end-marker must not contain each other");
        }
        if self.account.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return fail("account cannot be empty");
        }

        Ok(())
    }

    /// Returns the sentinel markers bounding the generated region.
    #[must_use]
    pub fn markers(&self) -> DocumentMarkers {
        DocumentMarkers::new(self.start_marker.clone(), self.end_marker.clone())
    }

    /// Returns the selection policy described by this configuration.
    #[must_use]
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::new(self.max_projects, self.organization_cap)
            .with_excluded(self.excluded_repositories.iter().cloned())
    }

    /// Returns the "more projects" link target, if one can be determined.
    #[must_use]
    pub fn more_projects_url(&self) -> Option<String> {
        self.more_projects_url.clone().or_else(|| {
            self.account
                .as_ref()
                .map(|account| format!("https://github.com/{account}?tab=repositories"))
        })
    }
}
