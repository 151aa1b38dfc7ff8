//! Document error types.

use thiserror::Error;

/// Errors that make the target document unusable.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read or write the document.
    #[error("Failed to access document '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A sentinel marker is absent.
    #[error("Marker '{marker}' not found in document")]
    MissingMarker { marker: String },

    /// A sentinel marker appears more than once.
    #[error("Marker '{marker}' appears {count} times in document, expected once")]
    DuplicateMarker { marker: String, count: usize },

    /// The end marker comes before the start marker.
    #[error("Marker '{end}' appears before '{start}'")]
    MarkersOutOfOrder { start: String, end: String },
}
