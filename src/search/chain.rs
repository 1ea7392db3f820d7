use tracing::{debug, info, warn};

use super::SearchError;
use crate::query::{SearchQuery, keyword_query};
use crate::wiki::extract::{extract_text_result, top_title};
use crate::wiki::{Edition, TextResult, WikiApi, WikiError};

/// What a transport failure during an attempt leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnTransportFailure {
    Advance,
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Attempt {
    pub edition: Edition,
    pub keywords_only: bool,
    pub on_transport_failure: OnTransportFailure,
}

impl Attempt {
    fn query_for(&self, query: &SearchQuery) -> String {
        if self.keywords_only {
            keyword_query(query.as_str())
        } else {
            query.as_str().to_string()
        }
    }
}

/// Text lookup modes, tried in order. Zero results always advance; a transport
/// failure advances except on the last row, where it is returned to the caller.
pub(crate) const ATTEMPTS: [Attempt; 3] = [
    Attempt {
        edition: Edition::Simple,
        keywords_only: false,
        on_transport_failure: OnTransportFailure::Advance,
    },
    Attempt {
        edition: Edition::En,
        keywords_only: false,
        on_transport_failure: OnTransportFailure::Advance,
    },
    Attempt {
        edition: Edition::En,
        keywords_only: true,
        on_transport_failure: OnTransportFailure::Fail,
    },
];

/// Finds a summary for `query`, walking `ATTEMPTS` until one yields a page.
pub async fn fetch_text(
    api: &impl WikiApi,
    query: &SearchQuery,
) -> Result<TextResult, SearchError> {
    for (i, attempt) in ATTEMPTS.iter().enumerate() {
        let mode = i + 1;
        let actual_query = attempt.query_for(query);

        match run_attempt(api, attempt.edition, &actual_query).await {
            Ok(Some(result)) => {
                info!(mode, edition = %attempt.edition, title = %result.title, "summary found");
                return Ok(result);
            }
            Ok(None) => {
                debug!(mode, edition = %attempt.edition, query = %actual_query, "no results");
            }
            Err(e) => match attempt.on_transport_failure {
                OnTransportFailure::Advance => {
                    warn!(
                        mode,
                        edition = %attempt.edition,
                        error = %e,
                        "lookup failed, trying next mode"
                    );
                }
                OnTransportFailure::Fail => {
                    warn!(
                        mode,
                        edition = %attempt.edition,
                        error = %e,
                        "lookup failed on last mode"
                    );
                    return Err(SearchError::Transport(e));
                }
            },
        }
    }

    Err(SearchError::NotFound)
}

/// Search, then fetch details for the top hit. `Ok(None)` means zero hits;
/// a search answered with an API error body counts as zero hits.
async fn run_attempt(
    api: &impl WikiApi,
    edition: Edition,
    query: &str,
) -> Result<Option<TextResult>, WikiError> {
    let response = match api.search(edition, query).await {
        Ok(response) => response,
        Err(WikiError::Rejected { code, info }) => {
            debug!(%edition, %code, %info, "search rejected, treating as no results");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    let Some(title) = top_title(&response) else {
        return Ok(None);
    };

    let details = api.page_details(edition, &title).await?;
    extract_text_result(details, edition)
        .map(Some)
        .ok_or(WikiError::MissingPage(title))
}
