//! # Feature: Sharing
//!
//! Links and an embeddable snippet for a playlist analysis.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use serde::{Deserialize, Serialize};

use crate::features::playlist::playlist_url;

/// Height of the embedded analysis frame, in pixels
const EMBED_HEIGHT: u32 = 450;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    pub share_url: String,
    pub embed_url: String,
    pub catalog_url: String,
    pub embed_code: String,
}

impl ShareLinks {
    /// Build links for `playlist_id` served from `base_url` (an origin, no trailing slash needed)
    pub fn new(base_url: &str, playlist_id: &str) -> Self {
        let origin = base_url.trim_end_matches('/');
        let share_url = format!("{}/playlist/{}", origin, playlist_id);
        let embed_url = format!("{}/embed/{}", origin, playlist_id);

        let embed_code = format!(
            "<iframe\n  width=\"100%\"\n  height=\"{}\"\n  src=\"{}\"\n  frameborder=\"0\"\n  allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\"\n  allowfullscreen></iframe>",
            EMBED_HEIGHT, embed_url
        );

        ShareLinks {
            share_url,
            embed_url,
            catalog_url: playlist_url(playlist_id),
            embed_code,
        }
    }
}
