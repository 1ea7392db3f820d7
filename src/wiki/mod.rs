//! MediaWiki action API: transport, wire types, and reduction into results.

pub mod client;
mod edition;
pub mod extract;
pub mod types;

pub use client::{WikiApi, WikiClient, WikiError};
pub use edition::Edition;
pub use types::{MediaItem, MediaKind, TextResult};
