//! CLI for the Project Feed Builder.
//!
//! Refreshes the projects timeline of a static page from GitHub.

use clap::Parser;
use project_feed::{
    resolve_token, FeedConfig, PreviewSource, RunSummary, Runner, RunnerConfig, RunnerError,
    StageOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Project Feed Builder - Render recent GitHub repositories into a static page.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the feed configuration file. Defaults are used if it doesn't exist.
    #[arg(long, env = "FEED_CONFIG", default_value = "feed.toml")]
    config: PathBuf,

    /// HTML document to update. Overrides the configuration file.
    #[arg(long, env = "FEED_DOCUMENT")]
    document: Option<PathBuf>,

    /// Account whose public repositories are listed without a token.
    #[arg(long, env = "FEED_ACCOUNT")]
    account: Option<String>,

    /// Commit images downloaded from private repositories.
    #[arg(long, env = "FEED_COMMIT_IMAGES")]
    commit_images: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // octocrab and reqwest both link rustls; pick one provider for the process.
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A TLS crypto provider was already installed");
    }

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let feed = FeedConfig::load_or_default(&args.config)?;

    let mut config = RunnerConfig::new(feed, resolve_token())
        .with_config_path(args.config)
        .with_commit_images(args.commit_images);
    if let Some(document) = args.document {
        config = config.with_document(document);
    }
    if let Some(account) = args.account {
        config = config.with_account(account);
    }

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Document: {}", summary.document.display());
    println!("  Listing: {}", summary.listing_access.as_str());
    println!("  Repositories fetched: {}", summary.repositories_fetched);
    println!("  Repositories eligible: {}", summary.repositories_eligible);
    println!("  Projects rendered: {}", summary.projects_rendered);

    if !summary.is_empty() {
        println!("  Preview images:");
        for source in [
            PreviewSource::Readme,
            PreviewSource::SocialPreview,
            PreviewSource::OwnerAvatar,
            PreviewSource::Placeholder,
        ] {
            println!("    {}: {}", source.as_str(), summary.previews.get(source));
        }
    }

    println!("  Images downloaded: {}", summary.images_downloaded);

    match summary.staging {
        Some(StageOutcome::Committed { staged }) => println!("  Images committed: {staged}"),
        Some(StageOutcome::Unchanged { .. }) => println!("  Images committed: up to date"),
        Some(StageOutcome::NoImages) | None => {}
    }
}
