//! Session state and the two user entry points: submitting a query and switching tabs.

mod cache;

use cache::ResultCache;

use serde::Serialize;
use tracing::{info, warn};

use crate::query::SearchQuery;
use crate::render::{self, View};
use crate::search::SearchError;
use crate::wiki::{MediaItem, MediaKind, TextResult, WikiApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Tab {
    #[default]
    Text,
    Detailed,
    Images,
    Videos,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Text => "Summary",
            Tab::Detailed => "Details",
            Tab::Images => "Images",
            Tab::Videos => "Videos",
        }
    }

    /// `None` for the tabs backed by the text slot.
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            Tab::Text | Tab::Detailed => None,
            Tab::Images => Some(MediaKind::Image),
            Tab::Videos => Some(MediaKind::Video),
        }
    }
}

/// Raw lookup result, for machine-readable output.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Fetched {
    Text(TextResult),
    Images(Vec<MediaItem>),
    Videos(Vec<MediaItem>),
}

impl Fetched {
    fn media(kind: MediaKind, items: Vec<MediaItem>) -> Self {
        match kind {
            MediaKind::Image => Fetched::Images(items),
            MediaKind::Video => Fetched::Videos(items),
        }
    }
}

/// Owns the wiki client, the result cache, the current tab, and the last submitted query.
///
/// Every entry point takes `&mut self`, so a session has at most one lookup in flight.
pub struct Controller<A> {
    api: A,
    cache: ResultCache,
    tab: Tab,
    query: Option<SearchQuery>,
}

impl<A: WikiApi> Controller<A> {
    pub fn new(api: A, tab: Tab) -> Self {
        Self {
            api,
            cache: ResultCache::default(),
            tab,
            query: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    /// Enter-key entry point. Blank input is ignored and returns `None`.
    pub async fn submit(&mut self, raw: &str) -> Option<View> {
        self.query = Some(SearchQuery::parse(raw)?);
        self.trigger().await
    }

    /// Tab-button entry point: re-runs the current query on the new tab.
    pub async fn switch_tab(&mut self, tab: Tab) -> Option<View> {
        self.tab = tab;
        self.trigger().await
    }

    /// Submits `raw` like `submit`, but returns the raw result instead of a view.
    pub async fn fetch(&mut self, raw: &str) -> Option<Result<Fetched, SearchError>> {
        let query = SearchQuery::parse(raw)?;
        self.query = Some(query.clone());
        Some(self.lookup(&query).await)
    }

    /// Item `n` (1-based) of the media grid currently on screen.
    pub fn media_item(&self, n: usize) -> Option<(MediaKind, &MediaItem)> {
        let kind = self.tab.media_kind()?;
        let items = self.cache.media(kind)?;
        items.get(n.checked_sub(1)?).map(|item| (kind, item))
    }

    async fn lookup(&mut self, query: &SearchQuery) -> Result<Fetched, SearchError> {
        match self.tab.media_kind() {
            None => self
                .cache
                .lookup_text(&self.api, query)
                .await
                .map(Fetched::Text),
            Some(kind) => self
                .cache
                .lookup_media(&self.api, query, kind)
                .await
                .map(|items| Fetched::media(kind, items)),
        }
    }

    async fn trigger(&mut self) -> Option<View> {
        let query = self.query.clone()?;
        info!(query = %query, tab = self.tab.label(), "search");

        let view = match self.lookup(&query).await {
            Ok(fetched) => fetched_view(self.tab, &fetched),
            Err(e) => {
                warn!(query = %query, tab = self.tab.label(), error = %e, "lookup failed");
                fallback_view(self.tab)
            }
        };
        Some(view)
    }
}

/// What a tab shows when its lookup fails. The link panel is cleared.
pub fn fallback_view(tab: Tab) -> View {
    let content = match tab.media_kind() {
        None => render::SUMMARY_UNAVAILABLE.to_string(),
        Some(kind) => render::no_media(kind),
    };
    View {
        content,
        links: None,
    }
}

fn fetched_view(tab: Tab, fetched: &Fetched) -> View {
    let (items, kind) = match fetched {
        Fetched::Text(result) => return text_view(tab, result),
        Fetched::Images(items) => (items, MediaKind::Image),
        Fetched::Videos(items) => (items, MediaKind::Video),
    };
    View {
        content: render::media_grid(items, kind),
        links: None,
    }
}

fn text_view(tab: Tab, result: &TextResult) -> View {
    let content = match tab {
        Tab::Detailed => render::detailed_text(&result.extract),
        _ => render::short_text(&result.extract),
    };
    View {
        content,
        links: Some(render::link_panel(result)),
    }
}
