use tracing::debug;

use crate::query::SearchQuery;
use crate::search::{SearchError, fetch_media, fetch_text};
use crate::wiki::{MediaItem, MediaKind, TextResult, WikiApi};

/// Results memoized for the most recent query.
///
/// Every slot belongs to `query`; adopting a different query clears them all.
/// Failures are never stored.
#[derive(Debug, Default)]
pub struct ResultCache {
    query: Option<SearchQuery>,
    text: Option<TextResult>,
    images: Option<Vec<MediaItem>>,
    videos: Option<Vec<MediaItem>>,
}

impl ResultCache {
    /// Makes `query` current, clearing every slot if it differs from the cached one.
    pub fn adopt(&mut self, query: &SearchQuery) {
        if self.is_current(query) {
            return;
        }
        debug!(query = %query, "new query, clearing cached results");
        *self = Self {
            query: Some(query.clone()),
            ..Self::default()
        };
    }

    pub fn text(&self) -> Option<&TextResult> {
        self.text.as_ref()
    }

    pub fn media(&self, kind: MediaKind) -> Option<&[MediaItem]> {
        match kind {
            MediaKind::Image => self.images.as_deref(),
            MediaKind::Video => self.videos.as_deref(),
        }
    }

    /// Stores a text result fetched for `query`. Dropped if `query` is no longer current.
    pub fn store_text(&mut self, query: &SearchQuery, result: TextResult) {
        if !self.is_current(query) {
            debug!(query = %query, "discarding stale text result");
            return;
        }
        self.text = Some(result);
    }

    /// Stores media fetched for `query`. Dropped if `query` is no longer current.
    pub fn store_media(
        &mut self,
        query: &SearchQuery,
        kind: MediaKind,
        items: Vec<MediaItem>,
    ) {
        if !self.is_current(query) {
            debug!(query = %query, kind = kind.label(), "discarding stale media result");
            return;
        }
        match kind {
            MediaKind::Image => self.images = Some(items),
            MediaKind::Video => self.videos = Some(items),
        }
    }

    pub async fn lookup_text(
        &mut self,
        api: &impl WikiApi,
        query: &SearchQuery,
    ) -> Result<TextResult, SearchError> {
        self.adopt(query);
        if let Some(hit) = self.text() {
            debug!(query = %query, "text cache hit");
            return Ok(hit.clone());
        }
        let result = fetch_text(api, query).await?;
        self.store_text(query, result.clone());
        Ok(result)
    }

    pub async fn lookup_media(
        &mut self,
        api: &impl WikiApi,
        query: &SearchQuery,
        kind: MediaKind,
    ) -> Result<Vec<MediaItem>, SearchError> {
        self.adopt(query);
        if let Some(hit) = self.media(kind) {
            debug!(query = %query, kind = kind.label(), "media cache hit");
            return Ok(hit.to_vec());
        }
        let items = fetch_media(api, query, kind).await?;
        self.store_media(query, kind, items.clone());
        Ok(items)
    }

    fn is_current(&self, query: &SearchQuery) -> bool {
        self.query.as_ref() == Some(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::mock::{Call, MockWiki, generator, hits, no_hits, page};

    fn query(s: &str) -> SearchQuery {
        SearchQuery::parse(s).unwrap()
    }

    fn one_image() -> serde_json::Value {
        serde_json::json!({
            "query": {"pages": [{"title": "Moon", "index": 1, "thumbnail": {"source": "https://img/moon.jpg"}}]}
        })
    }

    #[tokio::test]
    async fn repeated_text_lookup_fetches_once() {
        let mock = MockWiki::new()
            .search(hits(&["Moon"]))
            .details(page("Moon", "The Moon orbits Earth."));
        let mut cache = ResultCache::default();
        let q = query("moon");

        let first = cache.lookup_text(&mock, &q).await.unwrap();
        let second = cache.lookup_text(&mock, &q).await.unwrap();

        assert_eq!(first.extract, second.extract);
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn each_kind_fetched_at_most_once() {
        let mock = MockWiki::new()
            .images(generator(one_image()))
            .videos(generator(serde_json::json!({})));
        let mut cache = ResultCache::default();
        let q = query("moon");

        for _ in 0..3 {
            cache.lookup_media(&mock, &q, MediaKind::Image).await.unwrap();
            cache.lookup_media(&mock, &q, MediaKind::Video).await.unwrap();
        }

        assert_eq!(
            mock.calls(),
            vec![Call::Images("moon".into()), Call::Videos("moon".into())]
        );
    }

    #[tokio::test]
    async fn empty_media_result_is_cached() {
        let mock = MockWiki::new().videos(generator(serde_json::json!({})));
        let mut cache = ResultCache::default();
        let q = query("nothing");

        assert!(cache.lookup_media(&mock, &q, MediaKind::Video).await.unwrap().is_empty());
        assert!(cache.lookup_media(&mock, &q, MediaKind::Video).await.unwrap().is_empty());
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn query_change_clears_all_slots() {
        let mock = MockWiki::new()
            .search(hits(&["Moon"]))
            .details(page("Moon", "The Moon."))
            .images(generator(one_image()))
            .search(hits(&["Sun"]))
            .details(page("Sun", "The Sun."));
        let mut cache = ResultCache::default();

        cache.lookup_text(&mock, &query("moon")).await.unwrap();
        cache.lookup_media(&mock, &query("moon"), MediaKind::Image).await.unwrap();
        assert!(cache.text().is_some());
        assert!(cache.media(MediaKind::Image).is_some());

        let sun = cache.lookup_text(&mock, &query("sun")).await.unwrap();

        assert_eq!(sun.title, "Sun");
        assert_eq!(cache.text().map(|t| t.title.as_str()), Some("Sun"));
        assert!(cache.media(MediaKind::Image).is_none());
        assert!(cache.media(MediaKind::Video).is_none());
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let mock = MockWiki::new()
            .search(no_hits())
            .search(no_hits())
            .search(no_hits())
            .search(hits(&["Comet"]))
            .details(page("Comet", "A comet is icy."));
        let mut cache = ResultCache::default();
        let q = query("comet");

        assert!(matches!(
            cache.lookup_text(&mock, &q).await,
            Err(SearchError::NotFound)
        ));
        assert!(cache.text().is_none());

        let retry = cache.lookup_text(&mock, &q).await.unwrap();
        assert_eq!(retry.title, "Comet");
    }

    #[test]
    fn stale_result_does_not_overwrite_newer_query() {
        let mut cache = ResultCache::default();
        let old = query("old");
        let new = query("new");
        cache.adopt(&old);
        cache.adopt(&new);

        cache.store_media(
            &old,
            MediaKind::Image,
            vec![MediaItem {
                source: "https://img/old.jpg".into(),
                thumbnail: None,
                title: "Old".into(),
                mime_type: None,
            }],
        );

        assert!(cache.media(MediaKind::Image).is_none());
    }

    #[test]
    fn adopting_same_query_keeps_slots() {
        let mut cache = ResultCache::default();
        let q = query("same");
        cache.adopt(&q);
        cache.store_media(&q, MediaKind::Video, Vec::new());
        cache.adopt(&q);
        assert!(cache.media(MediaKind::Video).is_some());

        cache.adopt(&query("other"));
        assert!(cache.media(MediaKind::Video).is_none());
    }
}
