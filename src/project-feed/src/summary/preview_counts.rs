//! Per-source preview tallies.

use crate::preview::PreviewSource;

/// Number of cards whose image came from each preview source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewCounts {
    pub readme: usize,
    pub social_preview: usize,
    pub owner_avatar: usize,
    pub placeholder: usize,
}

impl PreviewCounts {
    /// Counts one image from `source`.
    pub fn record(&mut self, source: PreviewSource) {
        match source {
            PreviewSource::Readme => self.readme += 1,
            PreviewSource::SocialPreview => self.social_preview += 1,
            PreviewSource::OwnerAvatar => self.owner_avatar += 1,
            PreviewSource::Placeholder => self.placeholder += 1,
        }
    }

    /// Returns the count for `source`.
    #[must_use]
    pub fn get(&self, source: PreviewSource) -> usize {
        match source {
            PreviewSource::Readme => self.readme,
            PreviewSource::SocialPreview => self.social_preview,
            PreviewSource::OwnerAvatar => self.owner_avatar,
            PreviewSource::Placeholder => self.placeholder,
        }
    }
}
