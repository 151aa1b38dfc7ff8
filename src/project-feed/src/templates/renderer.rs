//! Template renderer.

use super::card::{CardView, RenderedCard};
use super::TemplateError;
use handlebars::{html_escape, Handlebars};
use serde_json::json;

const CARD_TEMPLATE: &str = include_str!("card.hbs");
const TIMELINE_TEMPLATE: &str = include_str!("timeline.hbs");
const TIMELINE_DOT_PARTIAL: &str = include_str!("timeline_dot.hbs");

/// Creates a Handlebars registry with the card and timeline templates.
///
/// The registry is configured with:
/// - HTML escaping via [`html_escape`]
/// - Strict mode (catches missing variables)
///
/// # Errors
///
/// Returns [`TemplateError::RegistrationError`] if a bundled template is malformed.
pub fn create_handlebars_registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut hbs = Handlebars::new();

    hbs.register_escape_fn(html_escape);
    hbs.set_strict_mode(true);

    hbs.register_partial("timeline_dot", TIMELINE_DOT_PARTIAL)?;
    hbs.register_template_string("card", CARD_TEMPLATE)?;
    hbs.register_template_string("timeline", TIMELINE_TEMPLATE)?;

    Ok(hbs)
}

/// Renders project cards into the fragment placed between the document markers.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled template fails to register.
    pub fn new() -> Result<Self, TemplateError> {
        Ok(Self {
            handlebars: create_handlebars_registry()?,
        })
    }

    /// Renders a single card.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_card(&self, card: &RenderedCard) -> Result<String, TemplateError> {
        Ok(self.handlebars.render("card", &CardView::from(card))?)
    }

    /// Renders all cards inside the timeline shell.
    ///
    /// With no cards the shell contains an empty-state message. The
    /// "more projects" link is only rendered when a URL is given.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_timeline(
        &self,
        cards: &[RenderedCard],
        more_projects_url: Option<&str>,
    ) -> Result<String, TemplateError> {
        let rendered_cards = cards
            .iter()
            .map(|card| self.render_card(card))
            .collect::<Result<Vec<_>, _>>()?;

        let data = json!({
            "has_cards": !cards.is_empty(),
            "cards": rendered_cards.concat().trim_end(),
            "more_projects_url": more_projects_url.unwrap_or(""),
        });

        let rendered = self.handlebars.render("timeline", &data)?;
        Ok(rendered.trim_end().to_string())
    }
}
