pub mod batch;
pub mod codec;
pub mod converter;
pub mod postprocess;
mod rounding;
mod scaling;

pub use batch::{BatchMetrics, BatchProcessor, JobOutcome};
pub use codec::{ImageCodec, NativeCodec};
pub use converter::convert;
pub use postprocess::{PngCrush, PostProcessor, WebpConverter};
pub use rounding::RoundingPolicy;
pub use scaling::{BucketEntry, BucketMap, SVG_UPSCALE_FACTOR, ScaleMode, ScalingEngine};
