//! # Paginated Playlist Fetch
//!
//! Walks the member listing page by page, resolving each page's item details
//! before asking for the next cursor, then assembles the snapshot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::Utc;
use log::{debug, info, warn};
use uuid::Uuid;

use super::catalog::CatalogApi;
use super::models::{Item, PlaylistMeta, PlaylistSnapshot};
use crate::core::{PipelineError, PipelineResult};

/// Where the page sequence currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

/// Lazy, finite sequence of resolved item pages for one playlist.
///
/// Each call to [`PlaylistPages::next_page`] issues one listing request and,
/// when the listing is non-empty, one detail request. After a failure the
/// sequence is exhausted; [`PlaylistPages::restart`] rewinds it.
pub struct PlaylistPages<'a> {
    catalog: &'a dyn CatalogApi,
    playlist_id: String,
    cursor: Cursor,
    pages_fetched: usize,
}

impl<'a> PlaylistPages<'a> {
    pub fn new(catalog: &'a dyn CatalogApi, playlist_id: impl Into<String>) -> Self {
        Self {
            catalog,
            playlist_id: playlist_id.into(),
            cursor: Cursor::Start,
            pages_fetched: 0,
        }
    }

    /// Fetch the next page, or `None` once the catalog stops returning cursors
    pub async fn next_page(&mut self) -> Option<PipelineResult<Vec<Item>>> {
        let token = match &self.cursor {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token.clone()),
            Cursor::Exhausted => return None,
        };

        let result = self.fetch_page(token.as_deref()).await;
        if result.is_err() {
            self.cursor = Cursor::Exhausted;
        }
        Some(result)
    }

    async fn fetch_page(&mut self, token: Option<&str>) -> PipelineResult<Vec<Item>> {
        let listing = self.catalog.playlist_items(&self.playlist_id, token).await?;
        let ids = listing.item_ids();

        self.cursor = match listing.next_cursor() {
            Some(next) => Cursor::Next(next),
            None => Cursor::Exhausted,
        };
        self.pages_fetched += 1;

        if ids.is_empty() {
            debug!(
                "Page {} of playlist {} has no member references",
                self.pages_fetched, self.playlist_id
            );
            return Ok(Vec::new());
        }

        let details = self.catalog.videos(&ids).await?;
        if details.items.len() < ids.len() {
            debug!(
                "Page {} of playlist {}: {} of {} items resolved (others unavailable)",
                self.pages_fetched,
                self.playlist_id,
                details.items.len(),
                ids.len()
            );
        }

        Ok(details.items.into_iter().map(Item::from).collect())
    }

    /// Rewind to the first page
    pub fn restart(&mut self) {
        self.cursor = Cursor::Start;
        self.pages_fetched = 0;
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == Cursor::Exhausted
    }
}

/// Fetch playlist metadata and every item, then assemble a snapshot.
///
/// Any failure discards everything fetched so far.
pub async fn fetch_playlist(catalog: &dyn CatalogApi, playlist_id: &str) -> PipelineResult<PlaylistSnapshot> {
    let request_id = Uuid::new_v4();
    info!("[{request_id}] Fetching playlist {}", playlist_id);

    let result = fetch_inner(catalog, playlist_id, request_id).await;
    if let Err(e) = &result {
        warn!("[{request_id}] Fetch of playlist {} failed: {}", playlist_id, e);
    }
    result
}

async fn fetch_inner(
    catalog: &dyn CatalogApi,
    playlist_id: &str,
    request_id: Uuid,
) -> PipelineResult<PlaylistSnapshot> {
    let meta: PlaylistMeta = catalog
        .playlist(playlist_id)
        .await?
        .items
        .into_iter()
        .next()
        .map(PlaylistMeta::from)
        .ok_or_else(|| PipelineError::NotFound(playlist_id.to_string()))?;

    let mut items: Vec<Item> = Vec::new();
    let mut pages = PlaylistPages::new(catalog, playlist_id);
    while let Some(page) = pages.next_page().await {
        let page = page?;
        debug!(
            "[{request_id}] Page {} resolved {} items",
            pages.pages_fetched(),
            page.len()
        );
        items.extend(page);
    }

    info!(
        "[{request_id}] Collected {} items over {} page(s) from playlist '{}'",
        items.len(),
        pages.pages_fetched(),
        meta.title
    );

    Ok(PlaylistSnapshot::assemble(meta, items, Utc::now()))
}
