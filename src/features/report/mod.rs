//! # Feature: Text Reports
//!
//! Plain-text renderings of a snapshot for terminal output: stats card,
//! duration histogram, longest items, history list and the compact embed card.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Embed card and history list
//! - 1.0.0: Initial release with stats card and histogram

use crate::features::playlist::{
    bucketize, estimated_watch_seconds, format_compact, format_verbose, longest_items, watch_url,
    Item, PlaylistSnapshot,
};
use crate::features::share::ShareLinks;

/// Width of the longest histogram bar, in characters
const BAR_WIDTH: usize = 30;

/// Rounded average, as a clock
fn average_clock(snapshot: &PlaylistSnapshot) -> String {
    format_compact(snapshot.average_duration_seconds.round() as u64)
}

/// Total duration, count, average and views (or estimated watch time)
pub fn render_stats_card(snapshot: &PlaylistSnapshot) -> String {
    let last_line = match snapshot.total_views {
        Some(views) => format!("Total Views:      {}", group_thousands(views)),
        None => format!(
            "Est. Watch Time:  {}",
            format_verbose(estimated_watch_seconds(snapshot.total_duration_seconds))
        ),
    };

    format!(
        "Total Duration:   {}\n\
         Video Count:      {}\n\
         Average Duration: {}\n\
         {}\n",
        format_verbose(snapshot.total_duration_seconds),
        snapshot.item_count,
        average_clock(snapshot),
        last_line
    )
}

/// One bar per duration bucket, scaled to the fullest bucket
pub fn render_histogram(items: &[Item]) -> String {
    let counts = bucketize(items);
    let max = counts.values().copied().max().unwrap_or(0);

    let mut out = String::new();
    for (bucket, count) in &counts {
        let width = if max > 0 { count * BAR_WIDTH / max } else { 0 };
        let label = format!("{} ({})", bucket.label(), bucket.range_label());
        out.push_str(&format!("{:<24} {:>4} {}\n", label, count, "█".repeat(width)));
    }
    out
}

pub fn render_longest(items: &[Item], limit: usize) -> String {
    let longest = longest_items(items, limit);
    if longest.is_empty() {
        return "No videos.\n".to_string();
    }

    let mut out = String::new();
    for (rank, item) in longest.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. [{}] {}\n    {}\n",
            rank + 1,
            format_compact(item.duration_seconds),
            item.title,
            watch_url(&item.id)
        ));
    }
    out
}

/// Full analysis page
pub fn render_report(snapshot: &PlaylistSnapshot, links: &ShareLinks, longest_limit: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", snapshot.title));
    out.push_str(&format!("By {}\n", snapshot.owner_channel_name));
    out.push_str(&format!("{}\n", links.catalog_url));
    if !snapshot.description.trim().is_empty() {
        out.push_str(&format!("\n{}\n", snapshot.description.trim()));
    }

    out.push_str("\n== Statistics ==\n");
    out.push_str(&render_stats_card(snapshot));

    out.push_str("\n== Duration Distribution ==\n");
    out.push_str(&render_histogram(&snapshot.items));

    out.push_str("\n== Longest Videos ==\n");
    out.push_str(&render_longest(&snapshot.items, longest_limit));

    out.push_str("\n== Share ==\n");
    out.push_str(&format!("Link:  {}\n", links.share_url));
    out.push_str(&format!("Embed: {}\n", links.embed_url));

    out.push_str(&format!(
        "\nAnalysed {}\n",
        snapshot.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out
}

/// Compact card for embedding
pub fn render_embed_card(snapshot: &PlaylistSnapshot, links: &ShareLinks) -> String {
    format!(
        "{}\n{} • {} videos\n\n{}\n{}\nView full analysis: {}\n",
        snapshot.title,
        snapshot.owner_channel_name,
        snapshot.item_count,
        render_stats_card(snapshot),
        render_histogram(&snapshot.items),
        links.share_url
    )
}

pub fn render_history(history: &[PlaylistSnapshot]) -> String {
    if history.is_empty() {
        return "No playlists analysed yet.\n".to_string();
    }

    let mut out = String::from("Recent Playlists\n");
    for snapshot in history {
        out.push_str(&format!(
            "- {} [{}]\n  {} • {} videos\n",
            snapshot.title,
            snapshot.id,
            format_compact(snapshot.total_duration_seconds),
            snapshot.item_count
        ));
    }
    out
}

/// 1234567 -> "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
