use serde::{Deserialize, Serialize};

/// Progress message type
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Progress,
    Complete,
    Halted,
}

/// Unified progress struct for tracking a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type (start, progress, complete, halted)
    pub progress_type: ProgressType,
    /// Number of finished jobs, successful or failed
    pub completed_jobs: usize,
    /// Total number of jobs
    pub total_jobs: usize,
    /// Completed fraction in [0, 1]
    pub fraction: f32,
    /// Current status message
    pub status: String,
}

impl Progress {
    /// Create a new Progress instance, deriving the fraction from the counts
    pub fn new(
        progress_type: ProgressType,
        completed_jobs: usize,
        total_jobs: usize,
        status: &str,
    ) -> Self {
        let fraction = if total_jobs > 0 {
            (completed_jobs as f32 / total_jobs as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            progress_type,
            completed_jobs,
            total_jobs,
            fraction,
            status: status.to_string(),
        }
    }
}
