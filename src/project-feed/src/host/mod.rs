//! Access to the repository hosting service.
//!
//! The pipeline only talks to GitHub through [`RepositoryHost`], so listing,
//! preview resolution and the runner can be exercised against an in-memory
//! implementation.

mod error;
mod github;
mod offline;

pub use error::HostError;
pub use github::GitHubHost;
pub use offline::OfflineHost;

use crate::listing::RepositorySummary;
use crate::rate_limit::RateLimitInfo;
use async_trait::async_trait;

/// Operations the feed needs from the hosting service.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Returns true if requests can be made on behalf of a token.
    fn is_authenticated(&self) -> bool;

    /// Lists repositories the token owner owns, collaborates on, or reaches
    /// through an organization.
    async fn list_affiliated(&self) -> Result<Vec<RepositorySummary>, HostError>;

    /// Lists the public repositories of `account` without authentication.
    async fn list_public(&self, account: &str) -> Result<Vec<RepositorySummary>, HostError>;

    /// Fetches the decoded README of a repository. `Ok(None)` if it has none.
    async fn readme(&self, repository: &RepositorySummary) -> Result<Option<String>, HostError>;

    /// Fetches the generated social preview URL of a repository.
    async fn social_preview(
        &self,
        repository: &RepositorySummary,
    ) -> Result<Option<String>, HostError>;

    /// Downloads raw bytes, authenticating when a token is available.
    async fn download(&self, url: &str) -> Result<Vec<u8>, HostError>;

    /// Reports the core API rate limit, if the host exposes one.
    async fn rate_limit(&self) -> Result<Option<RateLimitInfo>, HostError> {
        Ok(None)
    }
}
