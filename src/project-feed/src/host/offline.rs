//! Host used when no GitHub client can be built.

use super::{HostError, RepositoryHost};
use crate::listing::RepositorySummary;
use async_trait::async_trait;

/// A host that answers every request with [`HostError::Unavailable`].
///
/// Runs against it still rewrite the document, showing the empty state and
/// refreshing the footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineHost;

#[async_trait]
impl RepositoryHost for OfflineHost {
    fn is_authenticated(&self) -> bool {
        false
    }

    async fn list_affiliated(&self) -> Result<Vec<RepositorySummary>, HostError> {
        Err(HostError::Unavailable)
    }

    async fn list_public(&self, _account: &str) -> Result<Vec<RepositorySummary>, HostError> {
        Err(HostError::Unavailable)
    }

    async fn readme(&self, _repository: &RepositorySummary) -> Result<Option<String>, HostError> {
        Err(HostError::Unavailable)
    }

    async fn social_preview(
        &self,
        _repository: &RepositorySummary,
    ) -> Result<Option<String>, HostError> {
        Err(HostError::Unavailable)
    }

    async fn download(&self, _url: &str) -> Result<Vec<u8>, HostError> {
        Err(HostError::Unavailable)
    }
}
