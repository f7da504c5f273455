//! # Playlist Identifier Extraction
//!
//! Pull a playlist identifier out of whatever the user pasted.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Validation messages for the input form
//! - 1.0.0: Initial release with `list=` and short-link parsing

use crate::core::PipelineError;
use log::debug;
use regex::Regex;

/// Matches the last `list=` parameter or short-link path segment.
///
/// The leading `.*` is greedy, so a short link carrying a `list=` parameter
/// resolves to the playlist, not the video.
const IDENTIFIER_PATTERN: &str = r"^.*(?:youtu\.be/|list=)([^#&?]*)";

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a playlist URL";
pub const INVALID_INPUT_MESSAGE: &str = "Invalid playlist URL. Please check and try again.";

/// Extract a playlist identifier from a URL or raw string.
///
/// Returns `None` for empty input or when no known shape matches.
pub fn extract_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let re = Regex::new(IDENTIFIER_PATTERN).ok()?;
    let id = re
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())?;

    debug!("Extracted playlist id '{}' from input", id);
    Some(id.to_string())
}

/// Same as [`extract_id`] but reports why the input was rejected
pub fn validate_input(input: &str) -> Result<String, PipelineError> {
    if input.trim().is_empty() {
        return Err(PipelineError::InvalidIdentifier(EMPTY_INPUT_MESSAGE.to_string()));
    }
    extract_id(input).ok_or_else(|| PipelineError::InvalidIdentifier(INVALID_INPUT_MESSAGE.to_string()))
}

/// Catalog page for a playlist
pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={}", playlist_id)
}

/// Watch page for a single item
pub fn watch_url(item_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", item_id)
}
