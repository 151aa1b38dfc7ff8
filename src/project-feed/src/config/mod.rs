//! Configuration loading.
//!
//! The feed is configured by an optional `feed.toml` file and the GitHub
//! token found in the environment.

mod error;
mod feed;
mod token;

pub use error::ConfigError;
pub use feed::FeedConfig;
pub use token::{resolve_token, ApiToken, TOKEN_ENV_VARS};
