//! # Feature: Playlist Analysis
//!
//! Resolve a playlist identifier, page through the remote catalog, decode
//! durations and compute aggregate statistics.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Longest items, estimated watch time and forced refresh
//! - 1.1.0: Restartable page sequence, request ids in fetch logs
//! - 1.0.0: Initial release with cache-first resolution

pub mod api;
pub mod catalog;
pub mod duration;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod stats;
pub mod url;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{CatalogApi, YouTubeCatalog};
pub use duration::{format_compact, format_verbose, parse_duration_token};
pub use fetch::{fetch_playlist, PlaylistPages};
pub use models::{Item, PlaylistMeta, PlaylistSnapshot};
pub use pipeline::PlaylistPipeline;
pub use stats::{
    aggregate, bucketize, estimated_watch_seconds, longest_items, Aggregate, DurationBucket,
    DEFAULT_LONGEST_LIMIT,
};
pub use url::{extract_id, playlist_url, validate_input, watch_url};
