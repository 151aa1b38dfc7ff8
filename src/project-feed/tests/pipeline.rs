use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use project_feed::{
    ConfigError, DocumentError, FeedConfig, HostError, ListingAccess, OfflineHost, OwnerKind,
    RepositoryHost, RepositorySummary, Runner, RunnerConfig, RunnerError,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const MARKERS_ONLY_START: &str =
    "<html><body><!-- PROJECTS_START --><p>old</p></body></html>";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/index.html")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
}

/// In-memory host serving a fixed set of repositories.
#[derive(Default)]
struct StaticHost {
    authenticated: bool,
    repositories: Vec<RepositorySummary>,
    readmes: HashMap<String, String>,
    downloads: HashMap<String, Vec<u8>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StaticHost {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositoryHost for StaticHost {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn list_affiliated(&self) -> Result<Vec<RepositorySummary>, HostError> {
        self.record("list_affiliated".to_string());
        Ok(self.repositories.clone())
    }

    async fn list_public(&self, account: &str) -> Result<Vec<RepositorySummary>, HostError> {
        self.record(format!("list_public {account}"));
        Ok(self.repositories.clone())
    }

    async fn readme(&self, repository: &RepositorySummary) -> Result<Option<String>, HostError> {
        self.record(format!("readme {}", repository.full_name));
        Ok(self.readmes.get(&repository.full_name).cloned())
    }

    async fn social_preview(
        &self,
        repository: &RepositorySummary,
    ) -> Result<Option<String>, HostError> {
        self.record(format!("social_preview {}", repository.full_name));
        Ok(Some(format!(
            "https://opengraph.githubassets.com/1/{}",
            repository.full_name
        )))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, HostError> {
        self.record(format!("download {url}"));
        self.downloads
            .get(url)
            .cloned()
            .ok_or_else(|| HostError::UnexpectedResponse {
                message: format!("no image at {url}"),
            })
    }
}

fn repository(
    owner: &str,
    name: &str,
    kind: OwnerKind,
    day: u32,
    description: Option<&str>,
) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        owner: owner.to_string(),
        owner_kind: kind,
        owner_avatar_url: Some(format!("https://avatars.githubusercontent.com/{owner}")),
        description: description.map(str::to_string),
        is_fork: false,
        is_private: false,
        updated_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
        html_url: format!("https://github.com/{owner}/{name}"),
        default_branch: "main".to_string(),
    }
}

fn portfolio_host() -> StaticHost {
    let org = OwnerKind::Organization;
    let user = OwnerKind::User;

    let mut forked = repository("ana", "forked", user, 30, Some("A fork"));
    forked.is_fork = true;

    let mut private = repository("ana", "vault", user, 20, Some("Private notes"));
    private.is_private = true;

    let mut plain = repository("ana", "plain", user, 19, Some("Plain project"));
    plain.owner_avatar_url = None;

    let repositories = vec![
        repository("acme", "deck-one", org, 25, Some("First deck")),
        repository("acme", "deck-two", org, 24, Some("Second deck")),
        repository("acme", "deck-three", org, 23, Some("Third deck")),
        forked,
        repository("ana", "undescribed", user, 29, None),
        private,
        plain,
        repository("ana", "older", user, 10, Some("Older project")),
    ];

    let readmes = HashMap::from([
        (
            "acme/deck-one".to_string(),
            "# Deck\n\n![Deck screenshot](https://example.com/deck.png)\n".to_string(),
        ),
        (
            "ana/vault".to_string(),
            "# Vault\n\n<img src=\"docs/Vault Shot.png\" alt=\"Vault main window\">\n".to_string(),
        ),
    ]);

    let downloads = HashMap::from([(
        "https://raw.githubusercontent.com/ana/vault/main/docs/Vault%20Shot.png".to_string(),
        b"png-bytes".to_vec(),
    )]);

    StaticHost {
        authenticated: true,
        repositories,
        readmes,
        downloads,
        ..StaticHost::default()
    }
}

fn site_with_fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let document = dir.path().join("index.html");
    std::fs::copy(fixture(), &document).unwrap();
    (dir, document)
}

fn runner_for(document: &Path, host: StaticHost) -> Runner {
    let config = RunnerConfig::new(FeedConfig::default(), None)
        .with_document(document.to_path_buf())
        .with_account("ana".to_string());
    Runner::with_host(config, Box::new(host)).unwrap()
}

fn alt_position(html: &str, name: &str) -> usize {
    html.find(&format!("alt=\"{name} preview\"")).unwrap()
}

#[tokio::test]
async fn renders_selected_projects_into_document() {
    let (dir, document) = site_with_fixture();
    let runner = runner_for(&document, portfolio_host());

    let summary = runner.run_on(today()).await.unwrap();
    let html = std::fs::read_to_string(&document).unwrap();

    assert_eq!(summary.listing_access, ListingAccess::Authenticated);
    assert_eq!(summary.repositories_fetched, 8);
    assert_eq!(summary.repositories_eligible, 6);
    assert_eq!(summary.projects_rendered, 4);
    assert_eq!(summary.images_downloaded, 1);

    // Two organization projects first, then the two newest user projects.
    let order = ["deck-one", "deck-two", "vault", "plain"]
        .map(|name| alt_position(&html, name));
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(!html.contains("deck-three"));
    assert!(!html.contains("forked"));
    assert!(!html.contains("undescribed"));

    assert!(html.contains(r#"src="https://example.com/deck.png""#));
    assert!(html.contains(r#"src="https://opengraph.githubassets.com/1/acme/deck-two""#));
    assert!(html.contains(r#"src="/assets/project-images/ana_vault_vault_shot.png""#));
    assert!(html.contains(r#"src="https://opengraph.githubassets.com/1/ana/plain""#));

    let image = dir.path().join("assets/project-images/ana_vault_vault_shot.png");
    assert_eq!(std::fs::read(image).unwrap(), b"png-bytes");

    assert!(html.contains("&copy; 2025 Ana Souza"));
    assert!(html.contains(r#"<span id="page-last-updated">Última atualização: 07/03/2025</span>"#));
    assert!(!html.contains("Carregando projetos"));
}

#[tokio::test]
async fn content_outside_markers_is_preserved() {
    let (_dir, document) = site_with_fixture();
    let original = std::fs::read_to_string(&document).unwrap();
    let runner = runner_for(&document, portfolio_host());

    runner.run_on(today()).await.unwrap();
    let html = std::fs::read_to_string(&document).unwrap();

    let start = "<!-- PROJECTS_START -->";
    let prefix = &original[..original.find(start).unwrap() + start.len()];
    assert!(html.starts_with(prefix));

    let end = "<!-- PROJECTS_END -->";
    let section_tail = &original[original.find(end).unwrap()..original.find("<footer>").unwrap()];
    assert!(html.contains(section_tail));
    assert_eq!(html.matches(start).count(), 1);
    assert_eq!(html.matches(end).count(), 1);
}

#[tokio::test]
async fn second_run_on_same_day_changes_nothing() {
    let (_dir, document) = site_with_fixture();

    runner_for(&document, portfolio_host())
        .run_on(today())
        .await
        .unwrap();
    let first = std::fs::read_to_string(&document).unwrap();

    runner_for(&document, portfolio_host())
        .run_on(today())
        .await
        .unwrap();
    let second = std::fs::read_to_string(&document).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_listing_renders_empty_state() {
    let (_dir, document) = site_with_fixture();
    let runner = runner_for(&document, StaticHost::default());

    let summary = runner.run_on(today()).await.unwrap();
    let html = std::fs::read_to_string(&document).unwrap();

    assert!(summary.is_empty());
    assert_eq!(summary.repositories_fetched, 0);
    assert!(html.contains("projects-empty"));
    assert!(!html.contains("timeline-item-"));
    assert!(html.contains("<!-- PROJECTS_START -->"));
    assert!(html.contains("<!-- PROJECTS_END -->"));
}

#[tokio::test]
async fn offline_host_still_refreshes_document() {
    let (_dir, document) = site_with_fixture();
    let config = RunnerConfig::new(FeedConfig::default(), None)
        .with_document(document.clone())
        .with_account("ana".to_string());
    let runner = Runner::with_host(config, Box::new(OfflineHost)).unwrap();

    let summary = runner.run_on(today()).await.unwrap();
    let html = std::fs::read_to_string(&document).unwrap();

    assert_eq!(summary.listing_access, ListingAccess::Unavailable);
    assert!(summary.is_empty());
    assert!(html.contains("projects-empty"));
    assert!(html.contains("&copy; 2025 Ana Souza"));
}

#[test]
fn blank_account_override_fails_before_running() {
    let config = RunnerConfig::new(FeedConfig::default(), None)
        .with_document(PathBuf::from("index.html"))
        .with_account(String::new());

    let result = Runner::with_host(config, Box::new(OfflineHost));

    assert!(matches!(
        result,
        Err(RunnerError::Config(ConfigError::ValidationError { .. }))
    ));
}

#[tokio::test]
async fn missing_end_marker_leaves_document_untouched() {
    let dir = TempDir::new().unwrap();
    let document = dir.path().join("index.html");
    std::fs::write(&document, MARKERS_ONLY_START).unwrap();

    let host = portfolio_host();
    let calls = Arc::clone(&host.calls);
    let runner = runner_for(&document, host);

    let result = runner.run_on(today()).await;

    assert!(matches!(
        result,
        Err(RunnerError::Document(DocumentError::MissingMarker { .. }))
    ));
    assert_eq!(std::fs::read_to_string(&document).unwrap(), MARKERS_ONLY_START);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_document_is_an_error() {
    let dir = TempDir::new().unwrap();
    let runner = runner_for(&dir.path().join("absent.html"), StaticHost::default());

    let result = runner.run_on(today()).await;

    assert!(matches!(
        result,
        Err(RunnerError::Document(DocumentError::IoError { .. }))
    ));
}
