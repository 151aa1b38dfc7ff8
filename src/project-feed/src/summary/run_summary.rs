//! Run summary types.

use super::PreviewCounts;
use crate::listing::ListingAccess;
use crate::preview::PreviewImage;
use crate::staging::StageOutcome;
use std::path::PathBuf;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Document that was rewritten.
    pub document: PathBuf,

    /// Endpoint the repository listing came from.
    pub listing_access: ListingAccess,

    /// Number of repositories returned by the listing.
    pub repositories_fetched: usize,

    /// Number of repositories passing the eligibility filter.
    pub repositories_eligible: usize,

    /// Number of cards rendered into the document.
    pub projects_rendered: usize,

    /// Where each card's image came from.
    pub previews: PreviewCounts,

    /// Number of images stored under the asset directory.
    pub images_downloaded: usize,

    /// Result of committing downloaded images, if requested.
    pub staging: Option<StageOutcome>,
}

impl RunSummary {
    /// Creates a new empty summary for the given document.
    #[must_use]
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            ..Default::default()
        }
    }

    /// Counts a resolved preview image.
    pub fn record_preview(&mut self, image: &PreviewImage) {
        self.previews.record(image.source);
    }

    /// Returns true if no project made it onto the page.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects_rendered == 0
    }
}
