//! Orchestrates a feed run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::document::{locate_region, read_document, refresh_footer, splice_region, write_document};
use crate::host::{GitHubHost, OfflineHost, RepositoryHost};
use crate::listing::list_repositories;
use crate::preview::{AssetStore, DownloadedImages, PreviewResolver};
use crate::staging::{stage_images, DEFAULT_COMMIT_MESSAGE};
use crate::summary::RunSummary;
use crate::templates::{RenderedCard, TemplateRenderer};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

/// Drives a feed run against a repository host.
pub struct Runner {
    config: RunnerConfig,
    host: Box<dyn RepositoryHost>,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner talking to GitHub.
    ///
    /// A client that can't be built with the token is retried without one.
    /// If that fails too, the run continues against an [`OfflineHost`] and
    /// renders the empty state.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid or the
    /// templates can't be initialized.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let host = connect(&config);
        Self::with_host(config, host)
    }

    /// Builds a runner on top of any repository host.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid or the templates
    /// can't be initialized.
    pub fn with_host(
        config: RunnerConfig,
        host: Box<dyn RepositoryHost>,
    ) -> Result<Self, RunnerError> {
        config.validate()?;
        Ok(Self {
            config,
            host,
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Executes a run dated today in local time.
    ///
    /// # Errors
    ///
    /// See [`Runner::run_on`].
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        self.run_on(Local::now().date_naive()).await
    }

    /// Executes a run, stamping the footer with `today`.
    ///
    /// Network problems never fail the run; they degrade to fewer projects or
    /// fallback images. The document is validated before any request is made
    /// and is left untouched when any step fails.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the document can't be read or written, its
    /// markers are invalid, or rendering fails.
    pub async fn run_on(&self, today: NaiveDate) -> Result<RunSummary, RunnerError> {
        let feed = self.config.feed();
        let path = self.config.document_path();
        let markers = feed.markers();
        let mut summary = RunSummary::new(path);

        info!(path = %path.display(), "Reading document");
        let document = read_document(path)?;
        locate_region(&document, &markers)?;

        let listing = list_repositories(self.host.as_ref(), feed.account.as_deref()).await;
        summary.listing_access = listing.access;
        summary.repositories_fetched = listing.repositories.len();

        let policy = feed.selection_policy();
        summary.repositories_eligible = listing
            .repositories
            .iter()
            .filter(|repository| policy.is_eligible(repository))
            .count();

        let selected = policy.select(&listing.repositories);
        info!(
            count = selected.len(),
            eligible = summary.repositories_eligible,
            "Selected projects"
        );

        let assets = AssetStore::new(self.config.site_root(), feed.asset_dir.clone());
        let resolver =
            PreviewResolver::new(self.host.as_ref(), assets, feed.placeholder_image.clone());
        let mut downloads = DownloadedImages::new();

        let mut entries = Vec::with_capacity(selected.len());
        for repository in selected {
            let image = resolver.resolve(&repository, &mut downloads).await;
            summary.record_preview(&image);
            entries.push((repository, image));
        }

        let cards = RenderedCard::layout(entries);
        summary.projects_rendered = cards.len();
        summary.images_downloaded = downloads.len();

        let more_projects_url = feed.more_projects_url();
        let fragment = self
            .renderer
            .render_timeline(&cards, more_projects_url.as_deref())?;

        let updated = splice_region(&document, &markers, &fragment)?;
        let updated = refresh_footer(&updated, &markers, today, &feed.last_updated_label)?;

        if updated == document {
            info!(path = %path.display(), "Document already up to date");
        } else {
            write_document(path, &updated)?;
            info!(path = %path.display(), projects = cards.len(), "Document updated");
        }

        if self.config.commit_images() {
            match stage_images(self.config.site_root(), &downloads, DEFAULT_COMMIT_MESSAGE).await {
                Ok(outcome) => summary.staging = Some(outcome),
                Err(e) => warn!(error = %e, "Failed to commit downloaded images"),
            }
        }

        Ok(summary)
    }
}

fn connect(config: &RunnerConfig) -> Box<dyn RepositoryHost> {
    let token = config.token().cloned();
    let had_token = token.is_some();

    match GitHubHost::new(token) {
        Ok(host) => return Box::new(host),
        Err(e) => warn!(error = %e, "Failed to build GitHub client"),
    }

    if had_token {
        match GitHubHost::new(None) {
            Ok(host) => {
                warn!("Continuing with an unauthenticated GitHub client");
                return Box::new(host);
            }
            Err(e) => warn!(error = %e, "Failed to build unauthenticated GitHub client"),
        }
    }

    warn!("GitHub is unreachable, rendering without projects");
    Box::new(OfflineHost)
}
