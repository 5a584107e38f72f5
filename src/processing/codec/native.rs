use std::fs;
use std::path::Path;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbaImage};
use resvg::{tiny_skia, usvg};
use tracing::debug;
use crate::core::Dimension;
use crate::utils::{Compression, ConverterError, ConverterResult};
use super::{formats, ImageCodec};

/// Codec backed by the `image` crate for rasters and `resvg` for SVG.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeCodec;

impl NativeCodec {
    pub fn new() -> Self {
        Self
    }

    fn parse_svg(path: &Path) -> ConverterResult<usvg::Tree> {
        let data = fs::read(path)?;
        let opt = usvg::Options::default();
        usvg::Tree::from_data(&data, &opt)
            .map_err(|e| ConverterError::codec(format!("Failed to parse SVG {}: {}", path.display(), e)))
    }
}

impl ImageCodec for NativeCodec {
    fn decode(&self, path: &Path) -> ConverterResult<DynamicImage> {
        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| ConverterError::codec(format!("Failed to decode {}: {}", path.display(), e)))?;
        debug!("Decoded {} ({}x{})", path.display(), image.width(), image.height());
        Ok(image)
    }

    fn svg_size(&self, path: &Path) -> ConverterResult<(f64, f64)> {
        let size = Self::parse_svg(path)?.size();
        Ok((f64::from(size.width()), f64::from(size.height())))
    }

    fn rasterize_svg(&self, path: &Path, target: Dimension) -> ConverterResult<DynamicImage> {
        let tree = Self::parse_svg(path)?;
        let size = tree.size();

        let mut pixmap = tiny_skia::Pixmap::new(target.width, target.height)
            .ok_or_else(|| ConverterError::codec(format!("Invalid raster size {}", target)))?;
        let transform = tiny_skia::Transform::from_scale(
            target.width as f32 / size.width(),
            target.height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // tiny-skia stores premultiplied RGBA
        let mut raw = Vec::with_capacity(pixmap.pixels().len() * 4);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            raw.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        let raster = RgbaImage::from_raw(target.width, target.height, raw)
            .ok_or_else(|| ConverterError::codec("Rasterized SVG buffer has unexpected length"))?;

        debug!("Rasterized {} at {}", path.display(), target);
        Ok(DynamicImage::ImageRgba8(raster))
    }

    fn resize(&self, raster: &DynamicImage, target: Dimension, anti_alias: bool) -> DynamicImage {
        if raster.width() == target.width && raster.height() == target.height {
            return raster.clone();
        }
        let filter = if anti_alias {
            FilterType::Lanczos3
        } else {
            FilterType::CatmullRom
        };
        raster.resize_exact(target.width, target.height, filter)
    }

    fn encode(&self, raster: &DynamicImage, compression: Compression, quality: f32) -> ConverterResult<Vec<u8>> {
        formats::encode_as(raster, compression, quality)
    }
}
