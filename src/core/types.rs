//! Core types for conversion settings and results.

use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::platforms::{Platform, PlatformTarget};
use crate::processing::{RoundingPolicy, ScaleMode};
use crate::utils::{Compression, OutputCompressionMode};

/// User-supplied conversion options, before validation.
///
/// Field names follow the camelCase keys of the JSON settings file. Missing
/// keys fall back to the defaults of [`ConvertSettings::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertSettings {
    /// Source image or directory of images
    pub source: PathBuf,
    /// Output root; defaults to the source directory (or the parent of a source file)
    pub destination: Option<PathBuf>,
    /// Scale factor (FACTOR) or density-independent size (DP_WIDTH / DP_HEIGHT)
    pub scale_value: f64,
    pub scale_mode: ScaleMode,
    pub platform_target: PlatformTarget,
    pub output_compression_mode: OutputCompressionMode,
    /// Lossy compression quality in [0, 1]
    pub compression_quality: f32,
    /// Number of parallel workers in [1, 8]
    pub worker_count: usize,
    pub skip_existing_files: bool,
    pub skip_upscaling: bool,
    pub verbose_log: bool,
    /// Adds Android's ldpi and tvdpi buckets
    pub include_low_density_android_buckets: bool,
    pub halt_on_error: bool,
    /// Android output goes to `mipmap-*` instead of `drawable-*`
    pub use_mipmap_folder_naming: bool,
    pub enable_lossless_png_post_process: bool,
    pub enable_webp_post_conversion: bool,
    pub enable_anti_aliasing: bool,
    pub dry_run: bool,
    pub rounding_policy: RoundingPolicy,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: None,
            scale_value: 3.0,
            scale_mode: ScaleMode::Factor,
            platform_target: PlatformTarget::All,
            output_compression_mode: OutputCompressionMode::SameAsInput,
            compression_quality: 0.9,
            worker_count: 4,
            skip_existing_files: false,
            skip_upscaling: false,
            verbose_log: false,
            include_low_density_android_buckets: false,
            halt_on_error: false,
            use_mipmap_folder_naming: false,
            enable_lossless_png_post_process: false,
            enable_webp_post_conversion: false,
            enable_anti_aliasing: false,
            dry_run: false,
            rounding_policy: RoundingPolicy::RoundHalfUp,
        }
    }
}

impl ConvertSettings {
    /// Settings for `source` at `scale_value`, everything else at defaults.
    pub fn new(source: impl Into<PathBuf>, scale_value: f64) -> Self {
        Self {
            source: source.into(),
            scale_value,
            ..Self::default()
        }
    }
}

/// Pixel dimension of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A file written (or, in dry-run, planned) by a conversion job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducedFile {
    pub path: PathBuf,
    /// Size on disk; 0 for dry-run entries
    pub size_bytes: u64,
    /// Canonical density name, e.g. `xhdpi` or `2x`
    pub density: String,
    pub dimension: Dimension,
    pub compression: Compression,
}

/// Successful outcome of one conversion job.
#[derive(Debug, Clone, Default)]
pub struct JobOutput {
    /// Human-readable log of the job, one line per step
    pub log: String,
    pub files: Vec<ProducedFile>,
    /// Number of densities rendered
    pub densities: usize,
}

/// A captured per-job failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobError {
    pub source: PathBuf,
    pub platform: Platform,
    pub message: String,
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.source.display(), self.platform, self.message)
    }
}

/// Aggregated summary of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Jobs derived from the configuration (files x platforms)
    pub total_jobs: usize,
    /// Jobs that ran to completion, successfully or not
    pub finished_jobs: usize,
    pub succeeded_jobs: usize,
    /// Densities rendered by succeeded jobs
    pub finished_count: usize,
    /// Jobs never submitted because the batch halted
    pub skipped_jobs: Vec<super::ConversionJob>,
    /// Failures in completion order
    pub errors: Vec<JobError>,
    pub elapsed_millis: u64,
    pub halted: bool,
    pub produced_files: Vec<ProducedFile>,
    /// Concatenated job logs in completion order
    pub log: String,
}

impl BatchReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One-line summary for status output
    pub fn summary(&self) -> String {
        format!(
            "Finished Jobs: {} / Errors: {} / Skipped: {} / Duration: {}ms",
            self.finished_jobs,
            self.errors.len(),
            self.skipped_jobs.len(),
            self.elapsed_millis
        )
    }
}
