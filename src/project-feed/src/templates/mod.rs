//! HTML rendering using Handlebars.
//!
//! Each selected repository becomes a card on a vertical timeline. Cards
//! alternate between the left and right side of the central line, starting
//! on the left. The bundled templates live next to this module as `.hbs` files.

mod card;
mod error;
mod renderer;

pub use card::{RenderedCard, Side};
pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};
