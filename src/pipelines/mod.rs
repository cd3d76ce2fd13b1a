mod search;

pub use search::{Harvest, SourceOrchestrator, SourceSummary};
