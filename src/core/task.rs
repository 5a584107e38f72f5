//! Conversion job definition and creation.

use std::fmt;
use std::path::PathBuf;
use serde::Serialize;
use crate::core::Config;
use crate::platforms::Platform;

/// One independently schedulable unit: a source image converted for one platform.
///
/// Jobs are immutable and owned by the worker executing them; the density
/// buckets are computed inside the job once the source is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionJob {
    /// Path to the source image
    pub source: PathBuf,
    /// Target platform
    pub platform: Platform,
}

impl ConversionJob {
    pub fn new(source: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            source: source.into(),
            platform,
        }
    }

    /// Derives the job list: every source file crossed with every active platform.
    ///
    /// Ordered file-major so jobs of the same image are submitted together.
    pub fn derive_all(config: &Config) -> Vec<Self> {
        let platforms = config.platform_target.platforms();
        config
            .files_to_process()
            .iter()
            .flat_map(|file| platforms.iter().map(move |platform| Self::new(file, *platform)))
            .collect()
    }
}

impl fmt::Display for ConversionJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.source.display(), self.platform)
    }
}
