//! # Features Layer
//!
//! - `playlist`: identifier extraction, catalog fetch, statistics, orchestration
//! - `history`: persisted snapshot cache
//! - `share`: share links and embed snippet
//! - `report`: plain-text renderings

pub mod history;
pub mod playlist;
pub mod report;
pub mod share;

pub use history::{FileStorage, HistoryEvent, MemoryStorage, SnapshotCache, SubscriptionId};
pub use playlist::{PlaylistPipeline, PlaylistSnapshot, YouTubeCatalog};
pub use share::ShareLinks;
