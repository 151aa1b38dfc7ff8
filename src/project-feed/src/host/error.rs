//! Host error types.

use thiserror::Error;

/// Errors returned by a [`RepositoryHost`](super::RepositoryHost).
#[derive(Debug, Error)]
pub enum HostError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Raw content download error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The operation needs a token and none was configured.
    #[error("operation requires an authenticated client")]
    Unauthenticated,

    /// No client could be built, so nothing can be requested.
    #[error("repository host is unavailable")]
    Unavailable,

    /// The response didn't have the expected shape.
    #[error("unexpected response: {message}")]
    UnexpectedResponse { message: String },
}

impl HostError {
    /// Returns true if the error is a GitHub 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::GitHubError(octocrab::Error::GitHub { source, .. }) => {
                source.status_code.as_u16() == 404
            }
            Self::HttpError(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            _ => false,
        }
    }
}
