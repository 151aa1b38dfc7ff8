//! Target document handling.
//!
//! The generated fragment replaces the content between two sentinel
//! comments. Everything outside them is left alone apart from the footer
//! date fields. All transformations here are pure; only [`read_document`]
//! and [`write_document`] touch the filesystem.

mod error;
mod footer;
mod splice;

pub use error::DocumentError;
pub use footer::{refresh_footer, update_copyright_year, update_last_updated, LAST_UPDATED_ID};
pub use splice::{locate_region, splice_region};

use std::path::Path;

/// Default marker opening the generated region.
pub const DEFAULT_START_MARKER: &str = "<!-- PROJECTS_START -->";

/// Default marker closing the generated region.
pub const DEFAULT_END_MARKER: &str = "<!-- PROJECTS_END -->";

/// Sentinel strings bounding the generated region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMarkers {
    start: String,
    end: String,
}

impl DocumentMarkers {
    /// Creates markers from the given start and end strings.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns the start marker.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the end marker.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }
}

impl Default for DocumentMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_END_MARKER)
    }
}

/// Reads the target document.
///
/// # Errors
///
/// Returns [`DocumentError::IoError`] if the file cannot be read.
pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(|source| DocumentError::IoError {
        path: path.display().to_string(),
        source,
    })
}

/// Writes the target document in one call.
///
/// # Errors
///
/// Returns [`DocumentError::IoError`] if the file cannot be written.
pub fn write_document(path: &Path, content: &str) -> Result<(), DocumentError> {
    std::fs::write(path, content).map_err(|source| DocumentError::IoError {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn document_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");

        write_document(&path, "<html></html>").unwrap();

        assert_eq!(read_document(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn missing_document_is_io_error() {
        let dir = TempDir::new().unwrap();

        let result = read_document(&dir.path().join("absent.html"));

        assert!(matches!(result, Err(DocumentError::IoError { .. })));
    }
}
