use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use lazy_static::lazy_static;
use crate::utils::ConverterError;

lazy_static! {
    /// Every lowercase extension accepted as a conversion source.
    static ref SUPPORTED_EXTENSIONS: HashSet<&'static str> = ImageType::ALL
        .iter()
        .flat_map(|t| t.extensions().iter().copied())
        .collect();
}

/// Detected type of a source image, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    JPG,
    PNG,
    SVG,
    TIFF,
    GIF,
    BMP,
}

impl ImageType {
    pub const ALL: [ImageType; 6] = [
        Self::JPG,
        Self::PNG,
        Self::SVG,
        Self::TIFF,
        Self::GIF,
        Self::BMP,
    ];

    /// Get file extensions associated with this type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::JPG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::SVG => &["svg"],
            Self::TIFF => &["tif", "tiff"],
            Self::GIF => &["gif"],
            Self::BMP => &["bmp"],
        }
    }

    /// Whether the source must be rasterized instead of decoded
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::SVG)
    }

    /// Output compression used when the output should match the input,
    /// preferring PNG where the input type has no good raster equivalent.
    pub fn compat_compression(&self) -> Compression {
        match self {
            Self::JPG => Compression::JPG,
            Self::PNG | Self::SVG | Self::TIFF => Compression::PNG,
            Self::GIF => Compression::GIF,
            Self::BMP => Compression::BMP,
        }
    }

    /// Output compression used when the output must match the input strictly.
    pub fn strict_compression(&self) -> Compression {
        match self {
            Self::TIFF => Compression::TIFF,
            other => other.compat_compression(),
        }
    }
}

impl FromStr for ImageType {
    type Err = ConverterError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPG),
            "png" => Ok(Self::PNG),
            "svg" => Ok(Self::SVG),
            "tif" | "tiff" => Ok(Self::TIFF),
            "gif" => Ok(Self::GIF),
            "bmp" => Ok(Self::BMP),
            _ => Err(ConverterError::format(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Encoded output format of a produced file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    JPG,
    PNG,
    GIF,
    BMP,
    TIFF,
}

impl Compression {
    /// Get the extension written for this compression
    pub fn extension(&self) -> &'static str {
        match self {
            Self::JPG => "jpg",
            Self::PNG => "png",
            Self::GIF => "gif",
            Self::BMP => "bmp",
            Self::TIFF => "tif",
        }
    }

    /// Whether the compression discards information
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::JPG)
    }
}

/// How the output compression is chosen for each source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputCompressionMode {
    #[default]
    SameAsInput,
    SameAsInputStrict,
    AsPng,
    AsJpg,
    AsGif,
    AsBmp,
    AsJpgAndPng,
}

impl OutputCompressionMode {
    /// Every compression that must be produced for a source of `image_type`,
    /// in the order they are written.
    pub fn compressions_for(&self, image_type: ImageType) -> Vec<Compression> {
        match self {
            Self::SameAsInput => vec![image_type.compat_compression()],
            Self::SameAsInputStrict => vec![image_type.strict_compression()],
            Self::AsPng => vec![Compression::PNG],
            Self::AsJpg => vec![Compression::JPG],
            Self::AsGif => vec![Compression::GIF],
            Self::AsBmp => vec![Compression::BMP],
            Self::AsJpgAndPng => vec![Compression::JPG, Compression::PNG],
        }
    }
}

/// Get image type from a file path's extension
pub fn image_type_from_path(path: impl AsRef<Path>) -> Result<ImageType, ConverterError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ConverterError::format(
            format!("File has no extension: {}", path.display())
        ))?;

    ImageType::from_str(ext)
}

/// Check whether a path carries a supported source extension
pub fn is_supported_source(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(e.to_lowercase().as_str()))
        .unwrap_or(false)
}
