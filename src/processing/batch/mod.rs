mod metrics;
mod processor;

pub use metrics::{BatchMetrics, JobOutcome};
pub use processor::BatchProcessor;
