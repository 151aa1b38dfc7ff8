//! Marker-bounded region replacement.

use super::{DocumentError, DocumentMarkers};
use std::ops::Range;

/// Finds the byte range strictly between the start and end markers.
///
/// # Errors
///
/// Returns [`DocumentError`] unless each marker occurs exactly once and the
/// start marker precedes the end marker.
pub fn locate_region(
    document: &str,
    markers: &DocumentMarkers,
) -> Result<Range<usize>, DocumentError> {
    let start = find_unique(document, markers.start())?;
    let end = find_unique(document, markers.end())?;

    let region_start = start + markers.start().len();
    if end < region_start {
        return Err(DocumentError::MarkersOutOfOrder {
            start: markers.start().to_string(),
            end: markers.end().to_string(),
        });
    }

    Ok(region_start..end)
}

fn find_unique(document: &str, marker: &str) -> Result<usize, DocumentError> {
    let mut positions = document.match_indices(marker).map(|(index, _)| index);
    let first = positions.next().ok_or_else(|| DocumentError::MissingMarker {
        marker: marker.to_string(),
    })?;

    let extra = positions.count();
    if extra > 0 {
        return Err(DocumentError::DuplicateMarker {
            marker: marker.to_string(),
            count: extra + 1,
        });
    }

    Ok(first)
}

/// Replaces everything between the markers with `fragment`.
///
/// The markers and all content outside them are kept byte for byte. The
/// fragment is placed on its own lines and the end marker keeps the
/// indentation of its line, so splicing the same fragment twice is a no-op.
///
/// # Errors
///
/// Returns [`DocumentError`] if the markers are missing, duplicated, or out of order.
pub fn splice_region(
    document: &str,
    markers: &DocumentMarkers,
    fragment: &str,
) -> Result<String, DocumentError> {
    let region = locate_region(document, markers)?;
    let indent = line_indent(document, region.end);

    let mut output = String::with_capacity(document.len() + fragment.len());
    output.push_str(&document[..region.start]);
    output.push('\n');
    output.push_str(fragment);
    output.push('\n');
    output.push_str(indent);
    output.push_str(&document[region.end..]);
    Ok(output)
}

/// Returns the whitespace before `position` on its line, or "" if the line
/// has other content before it.
fn line_indent(document: &str, position: usize) -> &str {
    let before = &document[..position];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let prefix = &before[line_start..];

    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}
