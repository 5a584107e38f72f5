//! Maps a [`Compression`] and the configured quality to `image` encoder calls.

use std::io::Cursor;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use crate::utils::{Compression, ConverterError, ConverterResult};

type Result<T> = ConverterResult<T>;

// ── Encoder constants ─────────────────────────────────────────────────────────────────

const MIN_JPEG_QUALITY: u8 = 1;
const MAX_JPEG_QUALITY: u8 = 100;
/// Background used when flattening transparency for formats without alpha
const FLATTEN_BACKGROUND: [u8; 3] = [255, 255, 255];

// ── Helpers ───────────────────────────────────────────────────────────────────────────

/// Converts a `[0, 1]` quality into the JPEG encoder's 1..=100 scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    let scaled = (quality * 100.0).round();
    // float -> int casts saturate, NaN becomes 0
    (scaled as u8).clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

/// Composites `image` onto an opaque white background.
fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let blend = |c: u8, bg: u8| -> u8 {
            ((u16::from(c) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([
            blend(r, FLATTEN_BACKGROUND[0]),
            blend(g, FLATTEN_BACKGROUND[1]),
            blend(b, FLATTEN_BACKGROUND[2]),
        ])
    })
}

/// Brings any pixel layout down to 8-bit RGB(A), which every encoder accepts.
fn to_8bit(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image.clone(),
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn write_with_format(image: &DynamicImage, format: ImageFormat, label: &str) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .map_err(|e| ConverterError::codec(format!("{label} encode failed: {e}")))?;
    Ok(buffer.into_inner())
}

// ── Format encoders ───────────────────────────────────────────────────────────────────

/// Encodes as baseline JPEG. Transparency is flattened onto white.
pub fn encode_jpeg(image: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(flatten_alpha(image));
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality));
    rgb.write_with_encoder(encoder)
        .map_err(|e| ConverterError::codec(format!("JPEG encode failed: {e}")))?;
    Ok(buffer.into_inner())
}

/// Encodes as PNG with maximum deflate effort and adaptive filtering.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilterType::Adaptive);
    to_8bit(image)
        .write_with_encoder(encoder)
        .map_err(|e| ConverterError::codec(format!("PNG encode failed: {e}")))?;
    Ok(buffer.into_inner())
}

pub fn encode_gif(image: &DynamicImage) -> Result<Vec<u8>> {
    write_with_format(&DynamicImage::ImageRgba8(image.to_rgba8()), ImageFormat::Gif, "GIF")
}

pub fn encode_bmp(image: &DynamicImage) -> Result<Vec<u8>> {
    write_with_format(&to_8bit(image), ImageFormat::Bmp, "BMP")
}

pub fn encode_tiff(image: &DynamicImage) -> Result<Vec<u8>> {
    write_with_format(&to_8bit(image), ImageFormat::Tiff, "TIFF")
}

/// Dispatches to the encoder of `compression`.
///
/// `quality` only affects lossy compressions.
pub fn encode_as(image: &DynamicImage, compression: Compression, quality: f32) -> Result<Vec<u8>> {
    match compression {
        Compression::JPG => encode_jpeg(image, quality),
        Compression::PNG => encode_png(image),
        Compression::GIF => encode_gif(image),
        Compression::BMP => encode_bmp(image),
        Compression::TIFF => encode_tiff(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn translucent() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([0, 0, 0, 0])))
    }

    #[test]
    fn quality_maps_to_jpeg_scale() {
        assert_eq!(jpeg_quality(0.9), 90);
        assert_eq!(jpeg_quality(1.0), 100);
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(0.5), 50);
        assert_eq!(jpeg_quality(f32::NAN), 1);
    }

    #[test]
    fn transparent_pixels_flatten_to_white() {
        let rgb = flatten_alpha(&translucent());
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn every_compression_produces_decodable_bytes() {
        let source = translucent();
        for (compression, format) in [
            (Compression::JPG, ImageFormat::Jpeg),
            (Compression::PNG, ImageFormat::Png),
            (Compression::GIF, ImageFormat::Gif),
            (Compression::BMP, ImageFormat::Bmp),
            (Compression::TIFF, ImageFormat::Tiff),
        ] {
            let bytes = encode_as(&source, compression, 0.8).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), format, "{compression:?}");
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (4, 3));
        }
    }
}
