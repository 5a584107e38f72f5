//! Image decode / resize / encode primitives.
//!
//! # Architecture
//!
//! - [`ImageCodec`]: The seam the converter drives; swap it out in tests.
//! - [`NativeCodec`]: `image` for raster formats, `resvg` for SVG.
//! - [`formats`]: Maps a [`Compression`] and quality to encoder settings.

pub mod formats;
mod native;

use std::path::Path;
use image::DynamicImage;
use crate::core::Dimension;
use crate::utils::{Compression, ConverterResult};

pub use native::NativeCodec;

/// Image operations used by the conversion template.
///
/// Calls are synchronous and run on a blocking worker thread.
pub trait ImageCodec: Send + Sync {
    /// Decodes a raster source file
    fn decode(&self, path: &Path) -> ConverterResult<DynamicImage>;

    /// Native document size of an SVG file in user units, unrounded
    fn svg_size(&self, path: &Path) -> ConverterResult<(f64, f64)>;

    /// Renders an SVG file at exactly `target` pixels
    fn rasterize_svg(&self, path: &Path, target: Dimension) -> ConverterResult<DynamicImage>;

    /// Resamples `raster` to exactly `target` pixels
    fn resize(&self, raster: &DynamicImage, target: Dimension, anti_alias: bool) -> DynamicImage;

    /// Encodes `raster`; `quality` in [0, 1] applies to lossy compressions
    fn encode(&self, raster: &DynamicImage, compression: Compression, quality: f32) -> ConverterResult<Vec<u8>>;
}
