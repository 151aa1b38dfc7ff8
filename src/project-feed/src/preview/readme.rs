//! Image extraction from README content.

use regex::Regex;
use std::sync::LazyLock;

/// `![alt](url "optional title")`
static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("markdown image pattern is valid")
});

/// `<img ... src="url" ...>`
static HTML_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\s[^>]*?src\s*=\s*["']([^"']+)["'][^>]*>"#)
        .expect("html image pattern is valid")
});

static HTML_ALT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\salt\s*=\s*["']([^"']*)["']"#).expect("html alt pattern is valid")
});

/// URL fragments identifying status badges.
const BADGE_URL_MARKERS: [&str; 6] = [
    "shields.io",
    "badge",
    "codecov",
    "travis",
    "circleci",
    "/workflows/",
];

/// Alt texts used by common badges.
const BADGE_ALT_TEXTS: [&str; 6] = [
    "build",
    "status",
    "coverage",
    "license",
    "version",
    "downloads",
];

/// Host serving user and organization avatars.
const AVATAR_HOST: &str = "avatars.githubusercontent.com";

/// An image referenced by a README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeImage {
    /// A full URL, usable as is.
    Absolute(String),

    /// A path inside the repository, relative to its root. Percent-decoded.
    RepositoryPath(String),
}

#[derive(Debug)]
struct Candidate<'a> {
    offset: usize,
    alt: &'a str,
    url: &'a str,
}

/// Returns the first content image of a README, skipping badges and avatars.
///
/// Markdown and HTML images are considered in document order. Paths starting
/// with `./` or `../` are skipped.
#[must_use]
pub fn find_readme_image(readme: &str) -> Option<ReadmeImage> {
    collect_candidates(readme)
        .into_iter()
        .filter(|candidate| !is_decorative(candidate.alt, candidate.url))
        .find_map(|candidate| classify(candidate.url))
}

fn collect_candidates(readme: &str) -> Vec<Candidate<'_>> {
    let markdown = MARKDOWN_IMAGE.captures_iter(readme).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(Candidate {
            offset: whole.start(),
            alt: caps.get(1).map_or("", |m| m.as_str()),
            url: markdown_target(caps.get(2)?.as_str()),
        })
    });

    let html = HTML_IMAGE.captures_iter(readme).filter_map(|caps| {
        let whole = caps.get(0)?;
        let alt = HTML_ALT
            .captures(whole.as_str())
            .and_then(|alt| alt.get(1))
            .map_or("", |m| m.as_str());
        Some(Candidate {
            offset: whole.start(),
            alt,
            url: caps.get(1)?.as_str().trim(),
        })
    });

    let mut candidates: Vec<Candidate<'_>> = markdown.chain(html).collect();
    candidates.sort_by_key(|candidate| candidate.offset);
    candidates
}

/// Strips an optional title and angle brackets from a Markdown link target.
fn markdown_target(target: &str) -> &str {
    let target = target.trim();
    if let Some(inner) = target.strip_prefix('<') {
        return inner.split('>').next().unwrap_or(inner).trim();
    }
    target.split_whitespace().next().unwrap_or(target)
}

/// Returns true for badges, avatars and similar non-content images.
fn is_decorative(alt: &str, url: &str) -> bool {
    let url_lower = url.to_lowercase();
    if BADGE_URL_MARKERS
        .iter()
        .any(|marker| url_lower.contains(marker))
    {
        return true;
    }
    if url_lower.contains(AVATAR_HOST) {
        return true;
    }

    let alt = alt.trim();
    let alt_lower = alt.to_lowercase();
    if BADGE_ALT_TEXTS.contains(&alt_lower.as_str()) {
        return true;
    }

    // Short shouting labels like "CI" or "MIT LICENSE".
    alt.chars().count() < 20
        && alt.chars().any(char::is_uppercase)
        && !alt.chars().any(char::is_lowercase)
}

fn classify(url: &str) -> Option<ReadmeImage> {
    if url.is_empty() || url.starts_with('.') || url.starts_with('#') {
        return None;
    }

    let lower = url.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(ReadmeImage::Absolute(url.to_string()));
    }
    if url.starts_with("//") {
        return Some(ReadmeImage::Absolute(format!("https:{url}")));
    }
    // data:, mailto: and other schemes are not repository files.
    if url.split('/').next().is_some_and(|first| first.contains(':')) {
        return None;
    }

    // Query strings like `?raw=true` only matter to the github.com blob viewer.
    let file = url.split(['?', '#']).next().unwrap_or(url);
    let path = percent_decode(file.trim_start_matches('/'));
    if path.is_empty() {
        return None;
    }
    Some(ReadmeImage::RepositoryPath(path))
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let h1 = bytes[i + 1] as char;
            let h2 = bytes[i + 2] as char;
            if let (Some(a), Some(b)) = (h1.to_digit(16), h2.to_digit(16)) {
                out.push(((a << 4) + b) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_path_drops_query_and_fragment() {
        let readme = "![Editor window](docs/shot.png?raw=true)\n<img src=\"img/b.png#top\" alt=\"Other window\">";
        assert_eq!(
            find_readme_image(readme),
            Some(ReadmeImage::RepositoryPath("docs/shot.png".to_string()))
        );
        assert_eq!(
            find_readme_image("<img src=\"img/b.png#top\" alt=\"Other window\">"),
            Some(ReadmeImage::RepositoryPath("img/b.png".to_string()))
        );
    }

    #[test]
    fn finds_absolute_markdown_image() {
        let readme = "# Engine\n\n![Screenshot of the editor](https://example.com/editor.png)\n";
        assert_eq!(
            find_readme_image(readme),
            Some(ReadmeImage::Absolute(
                "https://example.com/editor.png".to_string()
            ))
        );
    }

    #[test]
    fn skips_badges_before_content_image() {
        let readme = r#"
[![Build](https://github.com/acme/engine/actions/workflows/ci.yml/badge.svg)](https://github.com/acme/engine/actions)
![coverage](https://codecov.io/gh/acme/engine/graph.svg)
![MIT](https://img.shields.io/badge/license-MIT-blue)
![Main window of the engine](docs/main%20window.png)
"#;
        assert_eq!(
            find_readme_image(readme),
            Some(ReadmeImage::RepositoryPath("docs/main window.png".to_string()))
        );
    }

    #[test]
    fn skips_avatars_and_dot_relative_paths() {
        let readme = r#"
![Author avatar picture](https://avatars.githubusercontent.com/u/1?v=4)
![Architecture diagram](../shared/diagram.png)
![Architecture diagram](./diagram.png)
"#;
        assert_eq!(find_readme_image(readme), None);
    }

    #[test]
    fn html_images_are_considered_in_document_order() {
        let readme = r#"
<p align="center"><img width="600" src="assets/banner.png" alt="Project banner image"></p>

![Later screenshot of the app](https://example.com/later.png)
"#;
        assert_eq!(
            find_readme_image(readme),
            Some(ReadmeImage::RepositoryPath("assets/banner.png".to_string()))
        );
    }

    #[test]
    fn root_relative_path_is_repository_path() {
        let readme = "![Dashboard overview screen](/docs/dashboard.png)";
        assert_eq!(
            find_readme_image(readme),
            Some(ReadmeImage::RepositoryPath("docs/dashboard.png".to_string()))
        );
    }

    #[test]
    fn markdown_title_is_ignored() {
        let readme = r#"![Game preview screenshot](media/preview.gif "Gameplay")"#;
        assert_eq!(
            find_readme_image(readme),
            Some(ReadmeImage::RepositoryPath("media/preview.gif".to_string()))
        );
    }

    #[test]
    fn html_badge_alt_is_skipped() {
        let readme = r#"<img src="https://example.com/x.svg" alt="license"> <img src='https://example.com/shot.png'>"#;
        assert_eq!(
            find_readme_image(readme),
            Some(ReadmeImage::Absolute("https://example.com/shot.png".to_string()))
        );
    }

    #[test]
    fn data_uris_are_skipped() {
        let readme = "![Inline pixel image](data:image/png;base64,AAAA)";
        assert_eq!(find_readme_image(readme), None);
    }

    #[test]
    fn readme_without_images() {
        assert_eq!(find_readme_image("# Title\n\nJust text."), None);
    }

    #[test]
    fn decodes_percent_sequences() {
        assert_eq!(percent_decode("a%20b%2Fc"), "a b/c");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }
}
