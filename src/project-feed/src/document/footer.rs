//! Footer timestamp refreshes.
//!
//! Besides the generated region, the page carries two date fields that are
//! refreshed on every run: the copyright year and a "last updated" span.

use super::{locate_region, DocumentError, DocumentMarkers};
use chrono::{Datelike, NaiveDate};
use handlebars::html_escape;
use regex::{Captures, NoExpand, Regex};
use std::sync::LazyLock;
use tracing::debug;

/// Element id of the last-updated span.
pub const LAST_UPDATED_ID: &str = "page-last-updated";

static COPYRIGHT_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"©\s*\d{4}").expect("valid copyright regex"));

static COPYRIGHT_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&copy;\s*\d{4}").expect("valid copyright regex"));

static ESCAPED_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id=\\"page-last-updated\\""#).expect("valid escaped id regex")
});

static LAST_UPDATED_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<span id="page-last-updated">.*?</span>"#).expect("valid span regex")
});

static REPEATED_SPANS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(<span id="page-last-updated">.*?</span>)(?:\s*<span id="page-last-updated">.*?</span>)+"#,
    )
    .expect("valid repeated span regex")
});

static COPYRIGHT_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(<p>&copy;\s*\d{4}.*?</p>)").expect("valid paragraph regex")
});

/// Rewrites every `© YYYY` and `&copy; YYYY` to the given year.
#[must_use]
pub fn update_copyright_year(document: &str, year: i32) -> String {
    let symbol = format!("© {year}");
    let entity = format!("&copy; {year}");

    let document = COPYRIGHT_SYMBOL.replace_all(document, NoExpand(&symbol));
    COPYRIGHT_ENTITY
        .replace_all(&document, NoExpand(&entity))
        .into_owned()
}

/// Sets the last-updated span to `label: dd/mm/YYYY`.
///
/// A backslash-escaped id is normalized and runs of adjacent spans collapse to
/// one. Without any span, one is placed right after the first `&copy;` paragraph.
/// The document is returned unchanged when neither exists.
#[must_use]
pub fn update_last_updated(document: &str, date: NaiveDate, label: &str) -> String {
    let span = format!(
        r#"<span id="{LAST_UPDATED_ID}">{}: {}</span>"#,
        html_escape(label),
        date.format("%d/%m/%Y")
    );

    let document = ESCAPED_ID.replace_all(document, NoExpand(r#"id="page-last-updated""#));
    let document = REPEATED_SPANS.replace_all(&document, "$1");

    if LAST_UPDATED_SPAN.is_match(&document) {
        return LAST_UPDATED_SPAN
            .replace_all(&document, NoExpand(&span))
            .into_owned();
    }

    if COPYRIGHT_PARAGRAPH.is_match(&document) {
        return COPYRIGHT_PARAGRAPH
            .replace(&document, |caps: &Captures| format!("{} {span}", &caps[1]))
            .into_owned();
    }

    debug!("No last-updated span or copyright paragraph found, skipping");
    document.into_owned()
}

/// Applies both footer refreshes for the given day.
///
/// The copyright year is only rewritten outside the generated region, so
/// dates quoted in project descriptions are kept.
///
/// # Errors
///
/// Returns [`DocumentError`] if the markers can't be located.
pub fn refresh_footer(
    document: &str,
    markers: &DocumentMarkers,
    today: NaiveDate,
    label: &str,
) -> Result<String, DocumentError> {
    let region = locate_region(document, markers)?;
    let year = today.year();

    let mut refreshed = update_copyright_year(&document[..region.start], year);
    refreshed.push_str(&document[region.clone()]);
    refreshed.push_str(&update_copyright_year(&document[region.end..], year));

    Ok(update_last_updated(&refreshed, today, label))
}
