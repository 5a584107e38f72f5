//! Public entry points for running a conversion batch.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;
use crate::core::{BatchReport, Config, Progress};
use crate::processing::{BatchProcessor, ImageCodec, NativeCodec};
use crate::utils::{ConverterError, ConverterResult};

/// Converts every job of `config` with the native codec.
///
/// `progress` is called from the aggregating task after each finished job,
/// never from a worker thread.
pub async fn convert(
    config: Config,
    progress: impl Fn(Progress) + Send + 'static,
) -> ConverterResult<BatchReport> {
    convert_with_codec(Arc::new(config), Arc::new(NativeCodec::new()), progress).await
}

/// Same as [`convert`] with a caller-supplied codec.
pub async fn convert_with_codec(
    config: Arc<Config>,
    codec: Arc<dyn ImageCodec>,
    progress: impl Fn(Progress) + Send + 'static,
) -> ConverterResult<BatchReport> {
    let processor = BatchProcessor::new(config, codec);
    processor.process_batch(progress).await
}

/// Runs the batch on its own thread and runtime and returns immediately.
///
/// `progress` receives the completed fraction in [0, 1]; `on_finished`
/// receives the final report once every submitted job is done. Fails
/// synchronously only when the runtime cannot be created.
pub fn execute(
    config: Config,
    progress: impl Fn(f32) + Send + 'static,
    on_finished: impl FnOnce(ConverterResult<BatchReport>) + Send + 'static,
) -> ConverterResult<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .max_blocking_threads(config.worker_count.max(1))
        .thread_name("dconvert-worker")
        .build()
        .map_err(|e| ConverterError::Worker(format!("Failed to start runtime: {}", e)))?;

    debug!("Starting batch thread with {} workers", config.worker_count);

    thread::Builder::new()
        .name("dconvert-batch".to_string())
        .spawn(move || {
            let report = runtime.block_on(convert(config, move |p: Progress| progress(p.fraction)));
            on_finished(report);
        })
        .map_err(|e| ConverterError::Worker(format!("Failed to spawn batch thread: {}", e)))
}
