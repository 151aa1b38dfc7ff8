//! Staging error types.

use thiserror::Error;

/// Errors that can occur while committing downloaded images.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The git executable could not be started.
    #[error("Failed to execute git {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A git command exited with a failure status.
    #[error("git {command} failed: {stderr}")]
    GitFailed { command: String, stderr: String },
}
