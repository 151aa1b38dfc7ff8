//! Runner error types.

/// Errors that abort a feed run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Template registration or rendering errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// Document read, marker, or write errors.
    #[error(transparent)]
    Document(#[from] crate::document::DocumentError),
}
