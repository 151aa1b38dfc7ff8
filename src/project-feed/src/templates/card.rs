//! Card layout.

use crate::listing::RepositorySummary;
use crate::preview::PreviewImage;
use serde::Serialize;

/// Side of the timeline a card is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Even positions go left, odd positions go right.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Returns the side as a string for templates.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A selected repository ready to be rendered.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    /// The repository shown on the card.
    pub repository: RepositorySummary,

    /// Image shown on the card.
    pub preview: PreviewImage,

    /// Side of the timeline.
    pub side: Side,
}

impl RenderedCard {
    /// Lays out repositories in selection order, alternating sides starting left.
    #[must_use]
    pub fn layout(entries: Vec<(RepositorySummary, PreviewImage)>) -> Vec<Self> {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (repository, preview))| Self {
                repository,
                preview,
                side: Side::for_index(index),
            })
            .collect()
    }
}

/// Values exposed to the card template.
#[derive(Debug, Serialize)]
pub(crate) struct CardView<'a> {
    side: &'static str,
    is_left: bool,
    text_align: &'static str,
    name: &'a str,
    description: &'a str,
    html_url: &'a str,
    image_src: &'a str,
    updated_iso: String,
    updated_display: String,
    is_private: bool,
}

impl<'a> From<&'a RenderedCard> for CardView<'a> {
    fn from(card: &'a RenderedCard) -> Self {
        let repository = &card.repository;
        let is_left = card.side == Side::Left;

        Self {
            side: card.side.as_str(),
            is_left,
            // Text hugs the central line.
            text_align: if is_left { "right" } else { "left" },
            name: &repository.name,
            description: repository.description_text().unwrap_or_default(),
            html_url: &repository.html_url,
            image_src: &card.preview.src,
            updated_iso: repository.updated_at.to_rfc3339(),
            updated_display: repository.updated_at.format("%d/%m/%Y").to_string(),
            is_private: repository.is_private,
        }
    }
}
