//! Validated, immutable conversion configuration.

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::core::ConvertSettings;
use crate::platforms::PlatformTarget;
use crate::processing::{RoundingPolicy, ScaleMode, ScalingEngine};
use crate::utils::{
    ConverterError, ConverterResult, OutputCompressionMode, list_source_files, validate_settings,
};

/// Configuration resolved once at startup and shared read-only by every job.
///
/// Only obtainable through [`Config::from_settings`], so every instance has
/// passed validation and carries its derived file set.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub scale_value: f64,
    pub scale_mode: ScaleMode,
    pub platform_target: PlatformTarget,
    pub output_compression_mode: OutputCompressionMode,
    pub compression_quality: f32,
    pub worker_count: usize,
    pub skip_existing_files: bool,
    pub skip_upscaling: bool,
    pub verbose_log: bool,
    pub include_low_density_android_buckets: bool,
    pub halt_on_error: bool,
    pub use_mipmap_folder_naming: bool,
    pub enable_lossless_png_post_process: bool,
    pub enable_webp_post_conversion: bool,
    pub enable_anti_aliasing: bool,
    pub dry_run: bool,
    pub rounding_policy: RoundingPolicy,
    files_to_process: Vec<PathBuf>,
}

impl Config {
    /// Validates `settings` and resolves the destination and job file set.
    ///
    /// Fails with a validation error without touching the filesystem beyond
    /// reading the source.
    pub fn from_settings(settings: ConvertSettings) -> ConverterResult<Self> {
        validate_settings(&settings)?;

        let source = settings.source;
        let destination = match settings.destination {
            Some(dst) => dst,
            None => default_destination(&source)?,
        };

        let files_to_process = if source.is_dir() {
            list_source_files(&source)?
        } else {
            vec![source.clone()]
        };

        debug!(
            "Resolved config: {} source file(s), destination {}",
            files_to_process.len(),
            destination.display()
        );

        Ok(Self {
            source,
            destination,
            scale_value: settings.scale_value,
            scale_mode: settings.scale_mode,
            platform_target: settings.platform_target,
            output_compression_mode: settings.output_compression_mode,
            compression_quality: settings.compression_quality,
            worker_count: settings.worker_count,
            skip_existing_files: settings.skip_existing_files,
            skip_upscaling: settings.skip_upscaling,
            verbose_log: settings.verbose_log,
            include_low_density_android_buckets: settings.include_low_density_android_buckets,
            halt_on_error: settings.halt_on_error,
            use_mipmap_folder_naming: settings.use_mipmap_folder_naming,
            enable_lossless_png_post_process: settings.enable_lossless_png_post_process,
            enable_webp_post_conversion: settings.enable_webp_post_conversion,
            enable_anti_aliasing: settings.enable_anti_aliasing,
            dry_run: settings.dry_run,
            rounding_policy: settings.rounding_policy,
            files_to_process,
        })
    }

    /// Source images of this batch, sorted by path
    pub fn files_to_process(&self) -> &[PathBuf] {
        &self.files_to_process
    }

    /// Whether outputs are nested under a per-platform folder
    pub fn has_multiple_platforms(&self) -> bool {
        self.platform_target.platforms().len() > 1
    }

    /// Scaling engine configured with this batch's scale, mode and rounding
    pub fn scaling_engine(&self) -> ScalingEngine {
        ScalingEngine::new(
            self.scale_mode,
            self.scale_value,
            self.rounding_policy,
            self.skip_upscaling,
        )
    }
}

fn default_destination(source: &Path) -> ConverterResult<PathBuf> {
    if source.is_dir() {
        return Ok(source.to_path_buf());
    }
    source
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConverterError::settings(format!(
            "Cannot derive a destination from {}", source.display()
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directory_source_lists_supported_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("readme.md"), b"").unwrap();

        let config = Config::from_settings(ConvertSettings::new(dir.path(), 3.0)).unwrap();
        assert_eq!(config.destination, dir.path());
        assert_eq!(
            config.files_to_process(),
            &[dir.path().join("a.jpg"), dir.path().join("b.png")]
        );
    }

    #[test]
    fn file_source_defaults_destination_to_parent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("icon.png");
        fs::write(&file, b"").unwrap();

        let config = Config::from_settings(ConvertSettings::new(&file, 2.0)).unwrap();
        assert_eq!(config.destination, dir.path());
        assert_eq!(config.files_to_process(), &[file]);
    }

    #[test]
    fn explicit_destination_wins() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("icon.png");
        fs::write(&file, b"").unwrap();
        let out = dir.path().join("out");

        let settings = ConvertSettings {
            destination: Some(out.clone()),
            ..ConvertSettings::new(&file, 2.0)
        };
        let config = Config::from_settings(settings).unwrap();
        assert_eq!(config.destination, out);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ConvertSettings {
            worker_count: 9,
            ..ConvertSettings::new(dir.path(), 3.0)
        };
        let err = Config::from_settings(settings).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn platform_nesting_depends_on_target() {
        let dir = tempfile::tempdir().unwrap();
        let all = Config::from_settings(ConvertSettings::new(dir.path(), 3.0)).unwrap();
        assert!(all.has_multiple_platforms());

        let settings = ConvertSettings {
            platform_target: PlatformTarget::Web,
            ..ConvertSettings::new(dir.path(), 3.0)
        };
        let web = Config::from_settings(settings).unwrap();
        assert!(!web.has_multiple_platforms());
    }
}
