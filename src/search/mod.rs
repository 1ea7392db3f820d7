//! Fetch chains: text lookup with edition fallback, single-shot media lookup.

mod chain;
mod media;

pub use chain::fetch_text;
pub use media::fetch_media;

use crate::wiki::WikiError;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("no results found")]
    NotFound,

    #[error("{0}")]
    Transport(#[from] WikiError),
}
