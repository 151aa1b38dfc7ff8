//! Repository listing.
//!
//! Listing fails soft: if neither the authenticated nor the public endpoint
//! answers, the run continues with an empty list.

mod repository;

pub(crate) use repository::RepositoryPayload;
pub use repository::{OwnerKind, RepositorySummary};

use crate::host::RepositoryHost;
use crate::rate_limit::report_rate_limit;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Which endpoint produced a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingAccess {
    /// Authenticated listing with owner, collaborator and organization affiliations.
    Authenticated,

    /// Unauthenticated listing of the account's public repositories.
    Public,

    /// No endpoint answered.
    #[default]
    Unavailable,
}

impl ListingAccess {
    /// Returns the access path as a string for display.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authenticated => "authenticated",
            Self::Public => "public",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Repositories returned by the hosting service.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Repositories in API order.
    pub repositories: Vec<RepositorySummary>,

    /// Endpoint the repositories came from.
    pub access: ListingAccess,
}

impl Listing {
    fn unavailable() -> Self {
        Self {
            repositories: Vec::new(),
            access: ListingAccess::Unavailable,
        }
    }
}

/// Lists the repositories associated with the account.
///
/// Tries the authenticated endpoint when the host holds a token, then the
/// public endpoint for `account`. Never fails: an unreachable API yields an
/// empty listing with [`ListingAccess::Unavailable`].
pub async fn list_repositories(host: &dyn RepositoryHost, account: Option<&str>) -> Listing {
    match host.rate_limit().await {
        Ok(Some(info)) => {
            report_rate_limit(&info);
        }
        Ok(None) => {}
        Err(e) => debug!(error = %e, "Could not read rate limit"),
    }

    if host.is_authenticated() {
        match host.list_affiliated().await {
            Ok(repositories) if !repositories.is_empty() => {
                info!(
                    count = repositories.len(),
                    "Fetched repositories via authenticated endpoint"
                );
                log_breakdown(&repositories);
                return Listing {
                    repositories,
                    access: ListingAccess::Authenticated,
                };
            }
            Ok(_) => {
                warn!("Authenticated endpoint returned no repositories, falling back to public");
            }
            Err(e) => {
                warn!(error = %e, "Authenticated listing failed, falling back to public");
            }
        }
    }

    let Some(account) = account else {
        warn!("No account configured, cannot list public repositories");
        return Listing::unavailable();
    };

    match host.list_public(account).await {
        Ok(repositories) => {
            info!(
                account,
                count = repositories.len(),
                "Fetched public repositories"
            );
            Listing {
                repositories,
                access: ListingAccess::Public,
            }
        }
        Err(e) => {
            warn!(account, error = %e, "Could not fetch repositories from any endpoint");
            Listing::unavailable()
        }
    }
}

/// Logs how many repositories come from users and organizations.
fn log_breakdown(repositories: &[RepositorySummary]) {
    let organizations: BTreeSet<&str> = repositories
        .iter()
        .filter(|r| r.is_organization_owned())
        .map(|r| r.owner.as_str())
        .collect();
    let organization_repos = repositories
        .iter()
        .filter(|r| r.is_organization_owned())
        .count();

    info!(
        user_repos = repositories.len() - organization_repos,
        organization_repos,
        organizations = ?organizations,
        "Repository breakdown"
    );
}
