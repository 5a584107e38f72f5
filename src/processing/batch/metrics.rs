use tracing::{debug, info, warn};
use crate::core::{BatchReport, ConversionJob, JobError, JobOutput, ProducedFile};

/// Result of one executed job as seen by the aggregator.
#[derive(Debug)]
pub struct JobOutcome {
    pub job: ConversionJob,
    pub result: Result<JobOutput, String>,
}

/// Running totals of a batch, owned by the single aggregating task.
#[derive(Debug, Clone)]
pub struct BatchMetrics {
    pub total_jobs: usize,
    pub finished_jobs: usize,
    pub succeeded_jobs: usize,
    pub finished_count: usize,
    pub errors: Vec<JobError>,
    pub produced_files: Vec<ProducedFile>,
    pub log: String,
    verbose: bool,
}

impl BatchMetrics {
    pub fn new(total_jobs: usize, verbose: bool) -> Self {
        Self {
            total_jobs,
            finished_jobs: 0,
            succeeded_jobs: 0,
            finished_count: 0,
            errors: Vec::new(),
            produced_files: Vec::new(),
            log: String::new(),
            verbose,
        }
    }

    /// Folds one finished job into the totals, in completion order.
    pub fn record(&mut self, outcome: JobOutcome) {
        self.finished_jobs += 1;
        let JobOutcome { job, result } = outcome;

        match result {
            Ok(output) => {
                if self.verbose {
                    info!("{}", output.log.trim_end());
                } else {
                    debug!("{}", output.log.trim_end());
                }
                self.succeeded_jobs += 1;
                self.finished_count += output.densities;
                self.log.push_str(&output.log);
                self.produced_files.extend(output.files);
            }
            Err(message) => {
                warn!("Failed to convert {}: {}", job, message);
                self.log.push_str(&format!("error: {}: {}\n", job, message));
                self.errors.push(JobError {
                    source: job.source,
                    platform: job.platform,
                    message,
                });
            }
        }

        debug!(
            "Job finished - {}/{} done, {} failed",
            self.finished_jobs,
            self.total_jobs,
            self.errors.len()
        );
    }

    pub fn completed(&self) -> usize {
        self.finished_jobs
    }

    pub fn into_report(self, skipped_jobs: Vec<ConversionJob>, elapsed_millis: u64, halted: bool) -> BatchReport {
        BatchReport {
            total_jobs: self.total_jobs,
            finished_jobs: self.finished_jobs,
            succeeded_jobs: self.succeeded_jobs,
            finished_count: self.finished_count,
            skipped_jobs,
            errors: self.errors,
            elapsed_millis,
            halted,
            produced_files: self.produced_files,
            log: self.log,
        }
    }
}
