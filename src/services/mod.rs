//! Service layer: the enrichment pipeline.

pub mod dedup;
pub mod enrichment;
pub mod merge;
pub mod synchronizer;

pub use dedup::AttemptTracker;
pub use enrichment::{CycleStats, Dispatch, EnrichmentOrchestrator};
pub use merge::merge_patches;
pub use synchronizer::TripListSynchronizer;
