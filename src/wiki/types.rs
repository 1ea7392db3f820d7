use serde::{Deserialize, Serialize};

use super::Edition;

/// MediaWiki `error` object, returned with a 200 status.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: Option<String>,
    pub info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub query: Option<SearchQueryBody>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQueryBody {
    pub search: Option<Vec<SearchHit>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub query: Option<PageQueryBody>,
}

#[derive(Debug, Deserialize)]
pub struct PageQueryBody {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    pub extract: Option<String>,
    pub fullurl: Option<String>,
    pub extlinks: Option<Vec<ExtLink>>,
}

#[derive(Debug, Deserialize)]
pub struct ExtLink {
    /// `url` under formatversion=2, `*` under the legacy format.
    #[serde(alias = "*")]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct GeneratorResponse {
    pub query: Option<GeneratorQueryBody>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratorQueryBody {
    pub pages: Option<Vec<GeneratorPage>>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratorPage {
    pub title: Option<String>,
    /// Rank assigned by the search generator (1-based).
    pub index: Option<u32>,
    pub thumbnail: Option<Thumbnail>,
    pub imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    pub url: Option<String>,
    pub mime: Option<String>,
    pub thumburl: Option<String>,
}

/// Summary of the page that satisfied a text search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResult {
    pub title: String,
    pub extract: String,
    pub full_url: Option<String>,
    pub external_links: Vec<String>,
    pub source_edition: Edition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// One image or video result. Images carry no separate thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub source: String,
    pub thumbnail: Option<String>,
    pub title: String,
    pub mime_type: Option<String>,
}

impl MediaItem {
    pub fn display_thumbnail(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.source)
    }
}
