//! External post-processors run on freshly written files.
//!
//! Failures never fail the job: the encoded file is already on disk, so a
//! missing binary or a non-zero exit only adds a warning to the job log.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};
use crate::core::{Config, ProducedFile};
use crate::utils::{Compression, ConverterError, ConverterResult, get_file_size};

/// A command-line tool applied to one output file at a time.
pub trait PostProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether files of `compression` are handled
    fn handles(&self, compression: Compression) -> bool;

    /// Processes `file`; returns the path of an additional output, if any.
    fn process(&self, file: &Path, compression: Compression, quality: f32) -> ConverterResult<Option<PathBuf>>;
}

/// Runs `binary` with `args`, mapping spawn failures and bad exit codes.
fn run_tool(binary: &str, args: &[String]) -> ConverterResult<()> {
    debug!("Running {} {:?}", binary, args);
    let output = Command::new(binary).args(args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConverterError::post_process(format!("{} not found on PATH", binary))
        } else {
            ConverterError::post_process(format!("Failed to start {}: {}", binary, e))
        }
    })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ConverterError::post_process(format!(
            "{} exited with {}: {}",
            binary,
            output.status,
            stderr.trim()
        )))
    }
}

/// Lossless in-place PNG recompression via `pngcrush`.
pub struct PngCrush {
    binary: String,
}

impl PngCrush {
    pub fn new() -> Self {
        Self::with_binary("pngcrush")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }
}

impl Default for PngCrush {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessor for PngCrush {
    fn name(&self) -> &'static str {
        "pngcrush"
    }

    fn handles(&self, compression: Compression) -> bool {
        compression == Compression::PNG
    }

    fn process(&self, file: &Path, _compression: Compression, _quality: f32) -> ConverterResult<Option<PathBuf>> {
        let args = vec![
            "-q".to_string(),
            "-ow".to_string(),
            file.to_string_lossy().into_owned(),
        ];
        run_tool(&self.binary, &args)?;
        Ok(None)
    }
}

/// Additional `.webp` file next to each PNG/JPG via `cwebp`.
pub struct WebpConverter {
    binary: String,
}

impl WebpConverter {
    pub fn new() -> Self {
        Self::with_binary("cwebp")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }
}

impl Default for WebpConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessor for WebpConverter {
    fn name(&self) -> &'static str {
        "cwebp"
    }

    fn handles(&self, compression: Compression) -> bool {
        matches!(compression, Compression::PNG | Compression::JPG)
    }

    fn process(&self, file: &Path, compression: Compression, quality: f32) -> ConverterResult<Option<PathBuf>> {
        let target = file.with_extension("webp");
        let mut args = Vec::new();
        if !compression.is_lossy() {
            args.push("-lossless".to_string());
        } else {
            args.push("-q".to_string());
            args.push(format!("{}", (quality * 100.0).round().clamp(0.0, 100.0)));
        }
        args.push(file.to_string_lossy().into_owned());
        args.push("-o".to_string());
        args.push(target.to_string_lossy().into_owned());

        run_tool(&self.binary, &args)?;
        Ok(Some(target))
    }
}

/// Post-processors enabled by `config`, in execution order.
pub fn enabled_post_processors(config: &Config) -> Vec<Box<dyn PostProcessor>> {
    let mut processors: Vec<Box<dyn PostProcessor>> = Vec::new();
    if config.enable_lossless_png_post_process {
        processors.push(Box::new(PngCrush::new()));
    }
    if config.enable_webp_post_conversion {
        processors.push(Box::new(WebpConverter::new()));
    }
    processors
}

/// Applies `processors` to every file in `files`, appending results and
/// warnings to `log`. Sizes of files changed in place are refreshed.
pub fn run_post_processors(
    processors: &[Box<dyn PostProcessor>],
    files: &mut [ProducedFile],
    quality: f32,
    log: &mut String,
) {
    for processor in processors {
        for file in files.iter_mut().filter(|f| processor.handles(f.compression)) {
            match processor.process(&file.path, file.compression, quality) {
                Ok(extra) => {
                    if let Ok(size) = get_file_size(&file.path) {
                        file.size_bytes = size;
                    }
                    match extra {
                        Some(extra) => {
                            let _ = writeln!(log, "{}: {} -> {}", processor.name(), file.path.display(), extra.display());
                        }
                        None => {
                            let _ = writeln!(log, "{}: {}", processor.name(), file.path.display());
                        }
                    }
                }
                Err(e) => {
                    warn!("Post-processing {} failed: {}", file.path.display(), e);
                    let _ = writeln!(log, "warning: {}", e);
                }
            }
        }
    }
}
