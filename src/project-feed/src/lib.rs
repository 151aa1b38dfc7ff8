#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod document;
pub mod host;
pub mod listing;
pub mod preview;
pub mod rate_limit;
pub mod runner;
pub mod selection;
pub mod staging;
pub mod summary;
pub mod templates;

pub use config::{resolve_token, ApiToken, ConfigError, FeedConfig, TOKEN_ENV_VARS};
pub use document::{
    refresh_footer, splice_region, update_copyright_year, update_last_updated, DocumentError,
    DocumentMarkers,
};
pub use host::{GitHubHost, HostError, OfflineHost, RepositoryHost};
pub use listing::{list_repositories, Listing, ListingAccess, OwnerKind, RepositorySummary};
pub use preview::{DownloadedImages, PreviewImage, PreviewResolver, PreviewSource};
pub use rate_limit::{check_core_rate_limit, RateLimitInfo};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use selection::SelectionPolicy;
pub use staging::{stage_images, StageOutcome, StagingError};
pub use summary::{PreviewCounts, RunSummary};
pub use templates::{create_handlebars_registry, RenderedCard, Side, TemplateError, TemplateRenderer};
