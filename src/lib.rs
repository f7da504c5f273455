// Core layer - configuration and error taxonomy
pub mod core;

// Features layer - playlist pipeline, history, sharing, reports
pub mod features;

pub use core::{Config, PipelineError, PipelineResult};

// Presentation-facing API
pub use features::history::{HistoryEvent, SnapshotCache, SubscriptionId};
pub use features::playlist::{
    bucketize, extract_id, format_compact, format_verbose, CatalogApi, DurationBucket, Item,
    PlaylistPipeline, PlaylistSnapshot, YouTubeCatalog,
};
pub use features::share::ShareLinks;
