//! Playlist data model: items and computed snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::aggregate;

/// One entry of a playlist (a video)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub duration_seconds: u64,
    pub thumbnail_url: String,
    pub published_at: DateTime<Utc>,
    /// Absent when the catalog withholds statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

/// Playlist-level metadata, as returned by the catalog before items are fetched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistMeta {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner_channel_id: String,
    pub owner_channel_name: String,
    pub thumbnail_url: String,
}

/// Fully resolved analysis of one playlist at one point in time.
///
/// Also the persisted shape of a history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnapshot {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner_channel_id: String,
    pub owner_channel_name: String,
    pub thumbnail_url: String,
    /// Catalog iteration order
    pub items: Vec<Item>,
    pub total_duration_seconds: u64,
    pub item_count: usize,
    pub average_duration_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_views: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl PlaylistSnapshot {
    /// Build a snapshot, deriving every aggregate from `items`
    pub fn assemble(meta: PlaylistMeta, items: Vec<Item>, created_at: DateTime<Utc>) -> Self {
        let totals = aggregate(&items);

        PlaylistSnapshot {
            id: meta.id,
            title: meta.title,
            description: meta.description,
            owner_channel_id: meta.owner_channel_id,
            owner_channel_name: meta.owner_channel_name,
            thumbnail_url: meta.thumbnail_url,
            items,
            total_duration_seconds: totals.total_duration_seconds,
            item_count: totals.item_count,
            average_duration_seconds: totals.average_duration_seconds,
            total_views: totals.total_views,
            created_at,
        }
    }
}
