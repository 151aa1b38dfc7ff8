//! Repository summaries as returned by the listing endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Kind of account owning a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum OwnerKind {
    /// Owned by a GitHub organization.
    Organization,

    /// Owned by a user (bots and unknown kinds are treated as users).
    #[serde(other)]
    User,
}

/// A repository the account is affiliated with.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySummary {
    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Owner login.
    pub owner: String,

    /// Whether the owner is an organization or a user.
    pub owner_kind: OwnerKind,

    /// Avatar of the owner, if GitHub reported one.
    pub owner_avatar_url: Option<String>,

    /// Repository description.
    pub description: Option<String>,

    /// Whether this repository is a fork.
    pub is_fork: bool,

    /// Whether this repository is private.
    pub is_private: bool,

    /// Last update time.
    pub updated_at: DateTime<Utc>,

    /// GitHub page of the repository.
    pub html_url: String,

    /// Default branch name (e.g., "main").
    pub default_branch: String,
}

impl RepositorySummary {
    /// Returns the trimmed description, or `None` when it is missing or blank.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Returns true if the repository belongs to an organization.
    #[must_use]
    pub fn is_organization_owned(&self) -> bool {
        self.owner_kind == OwnerKind::Organization
    }
}

/// Owner object embedded in a repository payload.
#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
    #[serde(rename = "type", default = "default_owner_kind")]
    kind: OwnerKind,
    #[serde(default)]
    avatar_url: Option<String>,
}

fn default_owner_kind() -> OwnerKind {
    OwnerKind::User
}

/// Subset of the GitHub repository object used by the feed.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryPayload {
    name: String,
    #[serde(default)]
    full_name: Option<String>,
    owner: OwnerPayload,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    private: bool,
    updated_at: DateTime<Utc>,
    html_url: String,
    #[serde(default)]
    default_branch: Option<String>,
}

impl From<RepositoryPayload> for RepositorySummary {
    fn from(payload: RepositoryPayload) -> Self {
        let full_name = payload
            .full_name
            .unwrap_or_else(|| format!("{}/{}", payload.owner.login, payload.name));

        Self {
            name: payload.name,
            full_name,
            owner: payload.owner.login,
            owner_kind: payload.owner.kind,
            owner_avatar_url: payload.owner.avatar_url.filter(|url| !url.is_empty()),
            description: payload.description,
            is_fork: payload.fork,
            is_private: payload.private,
            updated_at: payload.updated_at,
            html_url: payload.html_url,
            default_branch: payload
                .default_branch
                .filter(|branch| !branch.is_empty())
                .unwrap_or_else(|| "main".to_string()),
        }
    }
}
