//! # Pipeline Orchestrator
//!
//! Cache-first resolution of playlist snapshots. Cache hits never touch the
//! network; fresh fetches are written through before being returned.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Forced refresh and error-returning resolution
//! - 1.0.0: Initial release

use log::{debug, error, info};
use std::sync::Arc;

use super::catalog::CatalogApi;
use super::fetch::fetch_playlist;
use super::models::PlaylistSnapshot;
use super::url::validate_input;
use crate::core::PipelineResult;
use crate::features::history::SnapshotCache;

#[derive(Clone)]
pub struct PlaylistPipeline {
    catalog: Arc<dyn CatalogApi>,
    cache: Arc<SnapshotCache>,
}

impl PlaylistPipeline {
    pub fn new(catalog: Arc<dyn CatalogApi>, cache: Arc<SnapshotCache>) -> Self {
        Self { catalog, cache }
    }

    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    /// Cached snapshot if present, otherwise fetch, store and return.
    ///
    /// Failures are logged and collapsed to `None`.
    pub async fn resolve_playlist(&self, id: &str) -> Option<PlaylistSnapshot> {
        match self.try_resolve_playlist(id).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!("Failed to resolve playlist {}: {}", id, e);
                None
            }
        }
    }

    /// Like [`resolve_playlist`](Self::resolve_playlist) but keeps the failure reason
    pub async fn try_resolve_playlist(&self, id: &str) -> PipelineResult<PlaylistSnapshot> {
        if let Some(cached) = self.cache.get_by_id(id) {
            debug!("Playlist {} served from history", id);
            return Ok(cached);
        }
        self.try_refresh_playlist(id).await
    }

    /// Always fetch from the catalog, then write through the cache
    pub async fn refresh_playlist(&self, id: &str) -> Option<PlaylistSnapshot> {
        match self.try_refresh_playlist(id).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!("Failed to refresh playlist {}: {}", id, e);
                None
            }
        }
    }

    pub async fn try_refresh_playlist(&self, id: &str) -> PipelineResult<PlaylistSnapshot> {
        let snapshot = fetch_playlist(self.catalog.as_ref(), id).await?;
        self.cache.save(&snapshot);
        info!(
            "Playlist {} analysed: {} items, {}s total",
            snapshot.id, snapshot.item_count, snapshot.total_duration_seconds
        );
        Ok(snapshot)
    }

    /// Validate raw user input, then resolve (or refresh) the playlist it names
    pub async fn analyze_input(&self, raw_input: &str, refresh: bool) -> PipelineResult<PlaylistSnapshot> {
        let id = validate_input(raw_input)?;
        if refresh {
            self.try_refresh_playlist(&id).await
        } else {
            self.try_resolve_playlist(&id).await
        }
    }

    pub fn get_all_history(&self) -> Vec<PlaylistSnapshot> {
        self.cache.get_all()
    }

    pub fn clear_history(&self) {
        self.cache.clear()
    }
}
