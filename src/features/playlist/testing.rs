//! In-memory catalog that counts calls per endpoint.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::api::{
    ContentDetails, PlaylistItemListResponse, PlaylistItemResource, PlaylistItemSnippet,
    PlaylistListResponse, PlaylistResource, PlaylistSnippet, ResourceId, VideoListResponse,
    VideoResource, VideoSnippet, VideoStatistics, MAX_PAGE_SIZE,
};
use super::catalog::CatalogApi;
use crate::core::{PipelineError, PipelineResult};

#[derive(Default)]
pub struct FakeCatalog {
    /// playlist id -> number of items
    playlists: HashMap<String, usize>,
    playlist_calls: AtomicUsize,
    listing_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    fail_listing_on: AtomicUsize,
    fail_details: AtomicBool,
}

impl FakeCatalog {
    pub fn with_items(playlist_id: &str, count: usize) -> Self {
        let mut catalog = FakeCatalog::default();
        catalog.playlists.insert(playlist_id.to_string(), count);
        catalog
    }

    pub fn add_playlist(mut self, playlist_id: &str, count: usize) -> Self {
        self.playlists.insert(playlist_id.to_string(), count);
        self
    }

    /// Make the n-th listing request (1-based) fail
    pub fn fail_listing_on_call(&self, call: usize) {
        self.fail_listing_on.store(call, Ordering::SeqCst);
    }

    pub fn fail_details(&self) {
        self.fail_details.store(true, Ordering::SeqCst);
    }

    pub fn playlist_calls(&self) -> usize {
        self.playlist_calls.load(Ordering::SeqCst)
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.playlist_calls() + self.listing_calls() + self.detail_calls()
    }

    fn video(id: &str) -> VideoResource {
        let n: u64 = id
            .rsplit('v')
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);

        VideoResource {
            id: id.to_string(),
            snippet: VideoSnippet {
                title: format!("Video {}", id),
                ..Default::default()
            },
            content_details: ContentDetails {
                duration: format!("PT{}M{}S", n % 70, n % 60),
            },
            statistics: (n % 2 == 0).then(|| VideoStatistics {
                view_count: Some((n * 10).to_string()),
            }),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn playlist(&self, playlist_id: &str) -> PipelineResult<PlaylistListResponse> {
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);

        let items = if self.playlists.contains_key(playlist_id) {
            vec![PlaylistResource {
                id: playlist_id.to_string(),
                snippet: PlaylistSnippet {
                    title: format!("Playlist {}", playlist_id),
                    channel_title: "Test Channel".to_string(),
                    ..Default::default()
                },
            }]
        } else {
            Vec::new()
        };
        Ok(PlaylistListResponse { items })
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> PipelineResult<PlaylistItemListResponse> {
        let call = self.listing_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_listing_on.load(Ordering::SeqCst) == call {
            return Err(PipelineError::fetch_failed("playlistItems returned HTTP 500"));
        }

        let total = self.playlists.get(playlist_id).copied().unwrap_or(0);
        let offset: usize = page_token.and_then(|t| t.parse().ok()).unwrap_or(0);
        let end = (offset + MAX_PAGE_SIZE as usize).min(total);

        let items = (offset..end)
            .map(|n| PlaylistItemResource {
                snippet: PlaylistItemSnippet {
                    resource_id: ResourceId {
                        video_id: format!("{}-v{}", playlist_id, n),
                    },
                },
            })
            .collect();

        Ok(PlaylistItemListResponse {
            items,
            next_page_token: (end < total).then(|| end.to_string()),
        })
    }

    async fn videos(&self, video_ids: &[String]) -> PipelineResult<VideoListResponse> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_details.load(Ordering::SeqCst) {
            return Err(PipelineError::fetch_failed("videos returned HTTP 403"));
        }

        Ok(VideoListResponse {
            items: video_ids.iter().map(|id| Self::video(id)).collect(),
        })
    }
}
