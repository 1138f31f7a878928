pub mod aggregation_pipeline;
pub mod location_resolver;
pub mod overlap;
pub mod refresh_scheduler;
pub mod snapshot_store;

pub use aggregation_pipeline::{AggregationPipeline, PipelineSettings, RefreshOutcome};
pub use location_resolver::LocationResolver;
pub use overlap::spread_overlapping;
pub use refresh_scheduler::RefreshScheduler;
pub use snapshot_store::SnapshotStore;
