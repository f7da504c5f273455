//! Wire types for the three catalog endpoints (`playlists`, `playlistItems`, `videos`).
//!
//! Only the fields the pipeline reads are modelled; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::duration::parse_duration_token;
use super::models::{Item, PlaylistMeta};

/// Maximum page size the catalog accepts for `playlistItems`
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

/// `GET /playlists?part=snippet&id=...`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistResource {
    pub id: String,
    #[serde(default)]
    pub snippet: PlaylistSnippet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

impl From<PlaylistResource> for PlaylistMeta {
    fn from(resource: PlaylistResource) -> Self {
        let snippet = resource.snippet;
        let thumbnail_url = snippet
            .thumbnails
            .high
            .or(snippet.thumbnails.default)
            .map(|t| t.url)
            .unwrap_or_default();

        PlaylistMeta {
            id: resource.id,
            title: snippet.title,
            description: snippet.description,
            owner_channel_id: snippet.channel_id,
            owner_channel_name: snippet.channel_title,
            thumbnail_url,
        }
    }
}

/// `GET /playlistItems?part=snippet&playlistId=...&pageToken=...`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItemResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl PlaylistItemListResponse {
    /// Member item ids in response order
    pub fn item_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.snippet.resource_id.video_id.clone())
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// Cursor for the next page; an empty token means there is none
    pub fn next_cursor(&self) -> Option<String> {
        self.next_page_token.clone().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItemResource {
    #[serde(default)]
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub video_id: String,
}

/// `GET /videos?part=contentDetails,snippet,statistics&id=a,b,c`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: String,
}

/// The catalog encodes counters as decimal strings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default)]
    pub view_count: Option<String>,
}

impl From<VideoResource> for Item {
    fn from(resource: VideoResource) -> Self {
        let view_count = resource
            .statistics
            .and_then(|stats| stats.view_count)
            .and_then(|raw| raw.parse::<u64>().ok());

        Item {
            duration_seconds: parse_duration_token(&resource.content_details.duration),
            thumbnail_url: resource
                .snippet
                .thumbnails
                .medium
                .map(|t| t.url)
                .unwrap_or_default(),
            id: resource.id,
            title: resource.snippet.title,
            published_at: resource.snippet.published_at,
            view_count,
        }
    }
}
