//! Display fragments for the result panel and the link panel.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::markdown::escape_md_link;
use crate::wiki::{MediaItem, MediaKind, TextResult};

const SHORT_TEXT_WORDS: usize = 15;
const MAX_REFERENCE_LINKS: usize = 3;
const ELLIPSIS: &str = "...";
const PLAY_MARKER: &str = "▶ ";

pub const NO_TEXT: &str = "No text available.";
pub const NO_DETAILS: &str = "No details available.";
pub const NO_LINKS: &str = "No direct links found.";
pub const SUMMARY_UNAVAILABLE: &str = "Could not find a summary.";

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("parenthetical pattern is valid"));

/// Shortest prefix ending in sentence punctuation followed by whitespace or end of text.
static FIRST_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?[.!?](?:\s|$)").expect("sentence pattern is valid"));

/// What one user action puts on screen. `links` is `None` when the link panel is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub content: String,
    pub links: Option<String>,
}

/// One-line summary: parentheticals removed, first sentence only, at most 15 words.
pub fn short_text(extract: &str) -> String {
    let text = if extract.trim().is_empty() {
        NO_TEXT
    } else {
        extract
    };

    let stripped = PARENTHETICAL.replace_all(text, "");
    let sentence = FIRST_SENTENCE
        .find(&stripped)
        .map(|m| m.as_str())
        .unwrap_or(&*stripped);

    let words: Vec<&str> = sentence.split_whitespace().collect();
    let mut out = words
        .iter()
        .take(SHORT_TEXT_WORDS)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > SHORT_TEXT_WORDS {
        out.push_str(ELLIPSIS);
    }
    out
}

pub fn detailed_text(extract: &str) -> String {
    if extract.is_empty() {
        NO_DETAILS.to_string()
    } else {
        extract.to_string()
    }
}

pub fn no_media(kind: MediaKind) -> String {
    format!("No {}s found.", kind.label())
}

/// Numbered grid of thumbnails linking to the full-size source.
pub fn media_grid(items: &[MediaItem], kind: MediaKind) -> String {
    if items.is_empty() {
        return no_media(kind);
    }

    let marker = match kind {
        MediaKind::Video => PLAY_MARKER,
        MediaKind::Image => "",
    };

    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let title = escape_md_link(&item.title);
        out.push_str(&format!(
            "{}. {marker}[![{title}]({})]({}) {title}\n",
            i + 1,
            escape_md_link(display_thumbnail(item, kind)),
            escape_md_link(&item.source),
        ));
    }
    out
}

fn display_thumbnail(item: &MediaItem, kind: MediaKind) -> &str {
    match kind {
        MediaKind::Image => &item.source,
        MediaKind::Video => item.display_thumbnail(),
    }
}

/// Canonical article link plus up to three external references with their hostnames.
pub fn link_panel(result: &TextResult) -> String {
    let mut lines = Vec::new();

    if let Some(url) = &result.full_url {
        lines.push(format!(
            "[Read full article on Wikipedia]({})",
            escape_md_link(url)
        ));
    }

    let references = result
        .external_links
        .iter()
        .filter(|url| url.starts_with("http"))
        .take(MAX_REFERENCE_LINKS);
    for url in references {
        match hostname(url) {
            Some(host) => lines.push(format!(
                "[External Reference]({}) ({host})",
                escape_md_link(url)
            )),
            None => debug!(url = %url, "skipping malformed reference link"),
        }
    }

    if lines.is_empty() {
        NO_LINKS.to_string()
    } else {
        lines.join("\n")
    }
}

fn hostname(raw: &str) -> Option<String> {
    url::Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Full-size view of one media item.
pub fn lightbox(item: &MediaItem, kind: MediaKind) -> String {
    let mut out = format!("{}: {}\n{}", kind.label(), item.title, item.source);
    if let Some(mime) = &item.mime_type {
        out.push_str(&format!("\n({mime})"));
    }
    out
}
