use tracing::{debug, warn};

use super::SearchError;
use crate::query::SearchQuery;
use crate::wiki::extract::{extract_images, extract_videos};
use crate::wiki::{MediaItem, MediaKind, WikiApi, WikiError};

/// Single-shot media search. Undecodable bodies and API error bodies degrade
/// to an empty list; network and HTTP-status failures are returned.
pub async fn fetch_media(
    api: &impl WikiApi,
    query: &SearchQuery,
    kind: MediaKind,
) -> Result<Vec<MediaItem>, SearchError> {
    let outcome = match kind {
        MediaKind::Image => api.image_pages(query.as_str()).await,
        MediaKind::Video => api.video_files(query.as_str()).await,
    };

    let response = match outcome {
        Ok(response) => response,
        Err(WikiError::Decode(e)) => {
            warn!(kind = kind.label(), error = %e, "malformed media response, treating as empty");
            return Ok(Vec::new());
        }
        Err(WikiError::Rejected { code, info }) => {
            warn!(kind = kind.label(), %code, %info, "media search rejected, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let items = match kind {
        MediaKind::Image => extract_images(&response),
        MediaKind::Video => extract_videos(&response),
    };
    debug!(kind = kind.label(), count = items.len(), "media search complete");
    Ok(items)
}
