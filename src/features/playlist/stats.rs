//! # Statistics Aggregator
//!
//! Totals, averages, the fixed duration histogram and the longest-items list.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Longest items and estimated watch time
//! - 1.0.0: Initial release with totals and bucketing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::Item;

/// Fraction of the total runtime assumed watched when no view statistics exist
const WATCH_TIME_RATIO: f64 = 0.25;

/// Default number of entries in the longest-items list
pub const DEFAULT_LONGEST_LIMIT: usize = 5;

/// Aggregates over a full item sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub total_duration_seconds: u64,
    pub item_count: usize,
    pub average_duration_seconds: f64,
    /// Only present when the sum is strictly positive
    pub total_views: Option<u64>,
}

/// Sum durations and views over every item
pub fn aggregate(items: &[Item]) -> Aggregate {
    let total_duration_seconds = items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.duration_seconds));
    let total_views = items
        .iter()
        .filter_map(|item| item.view_count)
        .fold(0u64, |acc, views| acc.saturating_add(views));
    let item_count = items.len();

    let average_duration_seconds = if item_count > 0 {
        total_duration_seconds as f64 / item_count as f64
    } else {
        0.0
    };

    Aggregate {
        total_duration_seconds,
        item_count,
        average_duration_seconds,
        total_views: (total_views > 0).then_some(total_views),
    }
}

/// Fixed duration categories used for the histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    VeryShort,
    Short,
    Medium,
    Long,
    VeryLong,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 5] = [
        DurationBucket::VeryShort,
        DurationBucket::Short,
        DurationBucket::Medium,
        DurationBucket::Long,
        DurationBucket::VeryLong,
    ];

    /// Classify by minutes, half-open intervals
    pub fn for_seconds(duration_seconds: u64) -> Self {
        let minutes = duration_seconds as f64 / 60.0;
        if minutes < 3.0 {
            DurationBucket::VeryShort
        } else if minutes < 10.0 {
            DurationBucket::Short
        } else if minutes < 20.0 {
            DurationBucket::Medium
        } else if minutes < 60.0 {
            DurationBucket::Long
        } else {
            DurationBucket::VeryLong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::VeryShort => "Very Short",
            DurationBucket::Short => "Short",
            DurationBucket::Medium => "Medium",
            DurationBucket::Long => "Long",
            DurationBucket::VeryLong => "Very Long",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            DurationBucket::VeryShort => "< 3 min",
            DurationBucket::Short => "3-10 min",
            DurationBucket::Medium => "10-20 min",
            DurationBucket::Long => "20-60 min",
            DurationBucket::VeryLong => "> 60 min",
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Count items per bucket; every bucket is present, even when empty
pub fn bucketize(items: &[Item]) -> BTreeMap<DurationBucket, usize> {
    let mut counts: BTreeMap<DurationBucket, usize> =
        DurationBucket::ALL.iter().map(|bucket| (*bucket, 0)).collect();

    for item in items {
        *counts
            .entry(DurationBucket::for_seconds(item.duration_seconds))
            .or_insert(0) += 1;
    }

    counts
}

/// Up to `limit` items, longest first; ties keep catalog order
pub fn longest_items(items: &[Item], limit: usize) -> Vec<&Item> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| b.duration_seconds.cmp(&a.duration_seconds));
    sorted.truncate(limit);
    sorted
}

/// Rough watch time shown when the catalog provides no view counts
pub fn estimated_watch_seconds(total_duration_seconds: u64) -> u64 {
    (total_duration_seconds as f64 * WATCH_TIME_RATIO).round() as u64
}
