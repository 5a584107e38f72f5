use std::path::Path;
use crate::core::ConvertSettings;
use crate::processing::ScaleMode;
use crate::utils::{ConverterError, ConverterResult, ValidationError};

pub const MIN_WORKER_COUNT: usize = 1;
pub const MAX_WORKER_COUNT: usize = 8;
/// Exclusive upper bound of a FACTOR scale
const MAX_FACTOR_SCALE: f64 = 100.0;
/// Exclusive upper bound of a DP_WIDTH / DP_HEIGHT scale
const MAX_DP_SCALE: f64 = 9999.0;

/// Validates conversion settings before any job is scheduled
pub fn validate_settings(settings: &ConvertSettings) -> ConverterResult<()> {
    validate_input_path(&settings.source)?;
    validate_quality(settings.compression_quality)?;
    validate_worker_count(settings.worker_count)?;
    validate_scale(settings.scale_mode, settings.scale_value)?;
    Ok(())
}

/// Validates that the source file or directory exists
pub fn validate_input_path(path: &Path) -> ConverterResult<()> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(ValidationError::path_not_found(path).into());
    }

    if !path.is_file() && !path.is_dir() {
        return Err(ValidationError::not_a_file(path).into());
    }

    Ok(())
}

fn validate_quality(quality: f32) -> ConverterResult<()> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(ConverterError::settings(format!(
            "Invalid compression quality '{}'. Must be between (including) 0 and 1.0", quality
        )));
    }
    Ok(())
}

fn validate_worker_count(count: usize) -> ConverterResult<()> {
    if !(MIN_WORKER_COUNT..=MAX_WORKER_COUNT).contains(&count) {
        return Err(ConverterError::settings(format!(
            "Invalid worker count '{}'. Must be between (including) {} and {}",
            count, MIN_WORKER_COUNT, MAX_WORKER_COUNT
        )));
    }
    Ok(())
}

fn validate_scale(mode: ScaleMode, scale: f64) -> ConverterResult<()> {
    let upper = match mode {
        ScaleMode::Factor => MAX_FACTOR_SCALE,
        ScaleMode::DpWidth | ScaleMode::DpHeight => MAX_DP_SCALE,
    };

    if !scale.is_finite() || scale <= 0.0 || scale >= upper {
        return Err(ConverterError::settings(format!(
            "Invalid {} scale '{}'. Must be between (excluding) 0 and {}", mode, scale, upper
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(dir: &Path) -> ConvertSettings {
        ConvertSettings::new(dir, 3.0)
    }

    #[test]
    fn accepts_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_settings(&settings_for(dir.path())).is_ok());
    }

    #[test]
    fn rejects_missing_source() {
        let settings = ConvertSettings::new("/definitely/not/here.png", 3.0);
        assert!(validate_settings(&settings).is_err());
        assert!(validate_settings(&ConvertSettings::default()).is_err());
    }

    #[test]
    fn rejects_quality_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        for quality in [-0.1, 1.01] {
            let settings = ConvertSettings {
                compression_quality: quality,
                ..settings_for(dir.path())
            };
            assert!(validate_settings(&settings).is_err(), "quality {quality}");
        }
        for quality in [0.0, 1.0] {
            let settings = ConvertSettings {
                compression_quality: quality,
                ..settings_for(dir.path())
            };
            assert!(validate_settings(&settings).is_ok(), "quality {quality}");
        }
    }

    #[test]
    fn rejects_worker_count_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        for (count, ok) in [(0, false), (1, true), (8, true), (9, false)] {
            let settings = ConvertSettings {
                worker_count: count,
                ..settings_for(dir.path())
            };
            assert_eq!(validate_settings(&settings).is_ok(), ok, "workers {count}");
        }
    }

    #[test]
    fn scale_bounds_depend_on_mode() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            (ScaleMode::Factor, 0.0, false),
            (ScaleMode::Factor, 99.9, true),
            (ScaleMode::Factor, 100.0, false),
            (ScaleMode::DpWidth, 150.0, true),
            (ScaleMode::DpHeight, 9999.0, false),
            (ScaleMode::DpWidth, f64::NAN, false),
        ];
        for (mode, scale, ok) in cases {
            let settings = ConvertSettings {
                scale_mode: mode,
                scale_value: scale,
                ..settings_for(dir.path())
            };
            assert_eq!(validate_settings(&settings).is_ok(), ok, "{mode} {scale}");
        }
    }
}
