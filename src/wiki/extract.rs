use tracing::warn;

use super::Edition;
use super::types::{
    GeneratorPage, GeneratorResponse, MediaItem, PageResponse, SearchResponse, TextResult,
};

pub const MAX_MEDIA_ITEMS: usize = 5;
const MAX_EXTERNAL_LINKS: usize = 5;
const FILE_PREFIX: &str = "File:";

/// Title of the top-ranked search hit. A body without `query.search` counts as no hits.
pub fn top_title(response: &SearchResponse) -> Option<String> {
    response
        .query
        .as_ref()
        .and_then(|q| q.search.as_ref())
        .and_then(|hits| hits.first())
        .map(|hit| hit.title.clone())
}

/// Reduces a details response to a `TextResult`. `None` when no usable page came back.
pub fn extract_text_result(response: PageResponse, edition: Edition) -> Option<TextResult> {
    let page = response
        .query?
        .pages
        .into_iter()
        .find(|page| !page.missing)?;

    let extract = page.extract.unwrap_or_default();
    if extract.is_empty() {
        warn!(title = %page.title, "page has no extract");
    }

    let external_links = page
        .extlinks
        .unwrap_or_default()
        .into_iter()
        .map(|link| link.url)
        .take(MAX_EXTERNAL_LINKS)
        .collect();

    Some(TextResult {
        title: page.title,
        extract,
        full_url: page.fullurl.filter(|u| !u.is_empty()),
        external_links,
        source_edition: edition,
    })
}

pub fn extract_images(response: &GeneratorResponse) -> Vec<MediaItem> {
    ranked_pages(response)
        .filter_map(|page| {
            let source = page
                .thumbnail
                .as_ref()?
                .source
                .as_ref()
                .filter(|s| !s.is_empty())?
                .clone();
            Some(MediaItem {
                source,
                thumbnail: None,
                title: page.title.clone().unwrap_or_default(),
                mime_type: None,
            })
        })
        .take(MAX_MEDIA_ITEMS)
        .collect()
}

pub fn extract_videos(response: &GeneratorResponse) -> Vec<MediaItem> {
    ranked_pages(response)
        .filter_map(|page| {
            let info = page.imageinfo.as_ref()?.first()?;
            let mime = info.mime.as_ref().filter(|m| m.contains("video"))?;
            let source = info.url.as_ref().filter(|u| !u.is_empty())?.clone();
            let title = page.title.as_deref().unwrap_or_default();
            Some(MediaItem {
                source,
                thumbnail: info.thumburl.clone(),
                title: title.strip_prefix(FILE_PREFIX).unwrap_or(title).to_string(),
                mime_type: Some(mime.clone()),
            })
        })
        .take(MAX_MEDIA_ITEMS)
        .collect()
}

/// Pages in the rank order assigned by the search generator. Unranked pages keep
/// their response order after the ranked ones.
fn ranked_pages(response: &GeneratorResponse) -> impl Iterator<Item = &GeneratorPage> {
    let mut pages: Vec<&GeneratorPage> = response
        .query
        .as_ref()
        .and_then(|q| q.pages.as_ref())
        .map(|pages| pages.iter().collect())
        .unwrap_or_default();
    pages.sort_by_key(|page| page.index.unwrap_or(u32::MAX));
    pages.into_iter()
}
