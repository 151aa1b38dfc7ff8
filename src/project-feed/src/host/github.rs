//! GitHub implementation of [`RepositoryHost`].

use super::{HostError, RepositoryHost};
use crate::config::ApiToken;
use crate::listing::{RepositoryPayload, RepositorySummary};
use crate::rate_limit::{check_core_rate_limit, RateLimitInfo};
use async_trait::async_trait;
use octocrab::models::repos::Content;
use octocrab::Octocrab;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Results per page for repository listings.
const RESULTS_PER_PAGE: u8 = 100;

/// Affiliations requested from the authenticated listing.
const AFFILIATIONS: &str = "owner,collaborator,organization_member";

/// Timeout applied to raw image downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with raw downloads.
const USER_AGENT: &str = concat!("project-feed/", env!("CARGO_PKG_VERSION"));

/// Hosts that may receive the token on raw downloads.
const TRUSTED_DOWNLOAD_HOSTS: [&str; 3] = [
    "raw.githubusercontent.com",
    "github.com",
    "api.github.com",
];

const SOCIAL_PREVIEW_QUERY: &str = r"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    openGraphImageUrl
  }
}
";

#[derive(Serialize)]
struct AffiliatedQuery<'a> {
    visibility: &'a str,
    sort: &'a str,
    per_page: u8,
    affiliation: &'a str,
}

#[derive(Serialize)]
struct PublicQuery<'a> {
    sort: &'a str,
    per_page: u8,
}

/// Talks to api.github.com through octocrab and downloads raw files with reqwest.
pub struct GitHubHost {
    anonymous: Octocrab,
    authenticated: Option<Octocrab>,
    http: reqwest::Client,
    token: Option<ApiToken>,
}

impl GitHubHost {
    /// Builds the API clients. Without a token only public data is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if a client can't be constructed.
    pub fn new(token: Option<ApiToken>) -> Result<Self, HostError> {
        let anonymous = Octocrab::builder().build()?;
        let authenticated = token
            .as_ref()
            .map(|token| {
                Octocrab::builder()
                    .personal_token(token.expose().to_string())
                    .build()
            })
            .transpose()?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;

        Ok(Self {
            anonymous,
            authenticated,
            http,
            token,
        })
    }

    /// Returns the authenticated client when available, the anonymous one otherwise.
    fn client(&self) -> &Octocrab {
        self.authenticated.as_ref().unwrap_or(&self.anonymous)
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    fn is_authenticated(&self) -> bool {
        self.authenticated.is_some()
    }

    async fn list_affiliated(&self) -> Result<Vec<RepositorySummary>, HostError> {
        let client = self
            .authenticated
            .as_ref()
            .ok_or(HostError::Unauthenticated)?;

        let query = AffiliatedQuery {
            visibility: "all",
            sort: "updated",
            per_page: RESULTS_PER_PAGE,
            affiliation: AFFILIATIONS,
        };
        let payloads: Vec<RepositoryPayload> = client.get("/user/repos", Some(&query)).await?;

        Ok(payloads.into_iter().map(RepositorySummary::from).collect())
    }

    async fn list_public(&self, account: &str) -> Result<Vec<RepositorySummary>, HostError> {
        let query = PublicQuery {
            sort: "updated",
            per_page: RESULTS_PER_PAGE,
        };
        let route = format!("/users/{account}/repos");
        let payloads: Vec<RepositoryPayload> = self.anonymous.get(route, Some(&query)).await?;

        Ok(payloads.into_iter().map(RepositorySummary::from).collect())
    }

    async fn readme(&self, repository: &RepositorySummary) -> Result<Option<String>, HostError> {
        let route = format!("/repos/{}/{}/readme", repository.owner, repository.name);
        let content: Content = match self.client().get(route, None::<&()>).await {
            Ok(content) => content,
            Err(e) => {
                let error = HostError::from(e);
                if error.is_not_found() {
                    debug!(repo = %repository.full_name, "Repository has no README");
                    return Ok(None);
                }
                return Err(error);
            }
        };

        Ok(content.decoded_content().filter(|text| !text.trim().is_empty()))
    }

    async fn social_preview(
        &self,
        repository: &RepositorySummary,
    ) -> Result<Option<String>, HostError> {
        // GraphQL rejects anonymous requests.
        let client = self
            .authenticated
            .as_ref()
            .ok_or(HostError::Unauthenticated)?;

        let payload = json!({
            "query": SOCIAL_PREVIEW_QUERY,
            "variables": { "owner": repository.owner, "name": repository.name }
        });
        let response: Value = client.graphql(&payload).await?;

        if let Some(errors) = response.get("errors") {
            return Err(HostError::UnexpectedResponse {
                message: errors.to_string(),
            });
        }

        Ok(response
            .pointer("/data/repository/openGraphImageUrl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_owned))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, HostError> {
        let mut request = self.http.get(url);
        if let Some(token) = self.token.as_ref().filter(|_| is_trusted_host(url)) {
            request = request.bearer_auth(token.expose());
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn rate_limit(&self) -> Result<Option<RateLimitInfo>, HostError> {
        Ok(Some(check_core_rate_limit(self.client()).await?))
    }
}

/// Returns true if the token may be sent along with a request to `url`.
fn is_trusted_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .filter(|parsed| parsed.scheme() == "https")
        .and_then(|parsed| parsed.host_str().map(str::to_owned))
        .is_some_and(|host| TRUSTED_DOWNLOAD_HOSTS.contains(&host.as_str()))
}
