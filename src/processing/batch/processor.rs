use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use crate::core::{BatchReport, Config, ConversionJob, Progress, ProgressType};
use crate::processing::codec::ImageCodec;
use crate::processing::converter;
use crate::utils::{ConverterError, ConverterResult, extract_filename};
use crate::worker::{WorkerError, WorkerPool};
use super::metrics::{BatchMetrics, JobOutcome};

/// Runs every job of a configuration on a bounded worker pool.
///
/// Results flow over a channel into one aggregating task, which owns the
/// counters, the error list and the combined log, and is the only caller of
/// the progress callback.
pub struct BatchProcessor {
    config: Arc<Config>,
    codec: Arc<dyn ImageCodec>,
    pool: WorkerPool,
}

impl BatchProcessor {
    pub fn new(config: Arc<Config>, codec: Arc<dyn ImageCodec>) -> Self {
        let pool = WorkerPool::new(config.worker_count);
        Self { config, codec, pool }
    }

    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    /// Processes the batch, reporting progress after every finished job.
    ///
    /// With halt-on-error, no job is submitted once a failure has been
    /// observed; jobs already running finish and are counted. Never-submitted
    /// jobs are listed in the report.
    pub async fn process_batch(
        &self,
        progress: impl Fn(Progress) + Send + 'static,
    ) -> ConverterResult<BatchReport> {
        let started = Instant::now();
        let jobs = ConversionJob::derive_all(&self.config);
        let total_jobs = jobs.len();
        info!(
            "Processing batch of {} jobs ({} files) with {} workers",
            total_jobs,
            self.config.files_to_process().len(),
            self.pool.worker_count()
        );

        let halt = Arc::new(AtomicBool::new(false));
        let (tx, mut rx) = mpsc::unbounded_channel::<JobOutcome>();

        let aggregator = {
            let halt = halt.clone();
            let verbose = self.config.verbose_log;
            tokio::spawn(async move {
                let mut metrics = BatchMetrics::new(total_jobs, verbose);
                progress(Progress::new(ProgressType::Start, 0, total_jobs, "starting"));

                while let Some(outcome) = rx.recv().await {
                    let finished = extract_filename(&outcome.job.source);
                    metrics.record(outcome);
                    progress(Progress::new(
                        ProgressType::Progress,
                        metrics.completed(),
                        total_jobs,
                        &finished,
                    ));
                }

                let (kind, status) = if halt.load(Ordering::SeqCst) {
                    (ProgressType::Halted, "halted")
                } else {
                    (ProgressType::Complete, "complete")
                };
                progress(Progress::new(kind, metrics.completed(), total_jobs, status));
                metrics
            })
        };

        let mut skipped = Vec::new();
        let mut pending = jobs.into_iter();

        while let Some(job) = pending.next() {
            if halt.load(Ordering::SeqCst) {
                skipped.push(job);
                skipped.extend(pending.by_ref());
                break;
            }

            let slot = match self.pool.acquire().await {
                Ok(slot) => slot,
                Err(e) => {
                    let _ = tx.send(JobOutcome {
                        job,
                        result: Err(ConverterError::from(e).to_string()),
                    });
                    continue;
                }
            };

            // a failure may have been observed while waiting for the slot
            if halt.load(Ordering::SeqCst) {
                drop(slot);
                skipped.push(job);
                skipped.extend(pending.by_ref());
                break;
            }

            debug!("Submitting {}", job);
            let tx = tx.clone();
            let halt = halt.clone();
            let config = self.config.clone();
            let codec = self.codec.clone();
            let halt_on_error = config.halt_on_error;

            tokio::spawn(async move {
                let worker_job = job.clone();
                let result = WorkerPool::run_blocking(move || {
                    converter::convert(&worker_job, &config, codec.as_ref())
                })
                .await;

                let result = match result {
                    Ok(Ok(output)) => Ok(output),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(e) => Err(ConverterError::from(e).to_string()),
                };

                if result.is_err() && halt_on_error {
                    halt.store(true, Ordering::SeqCst);
                }
                let _ = tx.send(JobOutcome { job, result });
                // free the slot only after the outcome and halt flag are visible
                drop(slot);
            });
        }

        drop(tx);
        let metrics = aggregator.await.map_err(WorkerError::from)?;

        let halted = halt.load(Ordering::SeqCst);
        if halted {
            warn!("Batch halted after first error, {} jobs not submitted", skipped.len());
        }

        let elapsed_millis = started.elapsed().as_millis() as u64;
        let report = metrics.into_report(skipped, elapsed_millis, halted);

        if report.has_errors() {
            warn!("Batch completed with errors: {}", report.summary());
        } else {
            info!("Batch completed: {}", report.summary());
        }

        Ok(report)
    }
}
