//! Core types and configuration.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`ConvertSettings`]: Raw user options, deserializable from JSON
//! - [`Config`]: Validated, immutable configuration shared by all jobs
//! - [`ConversionJob`]: One source image converted for one platform
//! - [`BatchReport`]: Aggregated result of a batch run
//! - [`Progress`]: Progress tracking for batch operations

mod config;
mod types;
mod task;
mod progress;

pub use config::Config;
pub use types::{
    BatchReport, ConvertSettings, Dimension, JobError, JobOutput, ProducedFile,
};
pub use task::ConversionJob;
pub use progress::{Progress, ProgressType};
