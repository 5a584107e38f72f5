//! Density bucket computation.
//!
//! Turns a source dimension, the batch scale and a platform's density
//! set into one target dimension per density. All real-valued intermediate
//! sizes pass through the configured [`RoundingPolicy`].

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::core::Dimension;
use crate::platforms::DensityDescriptor;
use super::RoundingPolicy;

/// Master raster size multiplier for vector sources.
pub const SVG_UPSCALE_FACTOR: f64 = 4.0;

/// Interpretation of the configured scale value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    /// The source represents the bucket at `scale`x
    #[default]
    Factor,
    /// `scale` is the 1x width in density-independent pixels
    DpWidth,
    /// `scale` is the 1x height in density-independent pixels
    DpHeight,
}

impl ScaleMode {
    /// Unit suffix used in log headers
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Factor => "x",
            Self::DpWidth | Self::DpHeight => "dp",
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Factor => "FACTOR",
            Self::DpWidth => "DP_WIDTH",
            Self::DpHeight => "DP_HEIGHT",
        };
        f.write_str(name)
    }
}

/// One retained density and its target size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketEntry {
    pub density: DensityDescriptor,
    pub dimension: Dimension,
}

/// Target dimensions of one source image, ascending by density scale.
///
/// Densities dropped by skip-upscaling have no entry at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketMap {
    entries: Vec<BucketEntry>,
}

impl BucketMap {
    pub fn iter(&self) -> impl Iterator<Item = &BucketEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Target dimension of the density named `name`, if retained
    pub fn get(&self, name: &str) -> Option<Dimension> {
        self.entries
            .iter()
            .find(|e| e.density.name == name)
            .map(|e| e.dimension)
    }

    /// Retained densities in map order
    pub fn densities(&self) -> Vec<DensityDescriptor> {
        self.entries.iter().map(|e| e.density).collect()
    }
}

impl<'a> IntoIterator for &'a BucketMap {
    type Item = &'a BucketEntry;
    type IntoIter = std::slice::Iter<'a, BucketEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Scale mode and value of a batch, applied per source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingEngine {
    mode: ScaleMode,
    value: f64,
    rounding: RoundingPolicy,
    skip_upscaling: bool,
}

impl ScalingEngine {
    pub fn new(mode: ScaleMode, value: f64, rounding: RoundingPolicy, skip_upscaling: bool) -> Self {
        Self {
            mode,
            value,
            rounding,
            skip_upscaling,
        }
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Computes the bucket map of a source of `source` pixels.
    ///
    /// Output is sorted ascending by density scale regardless of input order.
    /// Every retained dimension is at least 1x1.
    pub fn compute_buckets(&self, source: Dimension, densities: &[DensityDescriptor]) -> BucketMap {
        let mut sorted = densities.to_vec();
        sorted.sort_by(|a, b| a.scale.total_cmp(&b.scale));

        let entries = match self.mode {
            ScaleMode::Factor => self.factor_buckets(source, &sorted),
            ScaleMode::DpWidth => self.dp_buckets(source.width, source.height, &sorted, false),
            ScaleMode::DpHeight => self.dp_buckets(source.height, source.width, &sorted, true),
        };

        BucketMap { entries }
    }

    fn factor_buckets(&self, source: Dimension, densities: &[DensityDescriptor]) -> Vec<BucketEntry> {
        let base_width = f64::from(source.width) / self.value;
        let base_height = f64::from(source.height) / self.value;

        densities
            .iter()
            .filter(|d| !self.skip_upscaling || self.value >= d.scale)
            .map(|d| BucketEntry {
                density: *d,
                dimension: self.clamped(base_width * d.scale, base_height * d.scale),
            })
            .collect()
    }

    /// DP modes: `driving` is the source side the dp value refers to.
    /// With `swapped` the driving side is the height.
    fn dp_buckets(
        &self,
        driving: u32,
        other: u32,
        densities: &[DensityDescriptor],
        swapped: bool,
    ) -> Vec<BucketEntry> {
        let scale_factor = self.value / f64::from(driving);
        let base_driving = f64::from(self.rounding.round(self.value));
        let base_other = f64::from(self.rounding.round(scale_factor * f64::from(other)));

        densities
            .iter()
            .filter(|d| !self.skip_upscaling || self.rounding.round(base_driving * d.scale) <= driving)
            .map(|d| {
                let (w, h) = if swapped {
                    (base_other * d.scale, base_driving * d.scale)
                } else {
                    (base_driving * d.scale, base_other * d.scale)
                };
                BucketEntry {
                    density: *d,
                    dimension: self.clamped(w, h),
                }
            })
            .collect()
    }

    /// Pixel size of a vector document, rounded with the batch policy.
    pub fn document_dimension(&self, width: f64, height: f64) -> Dimension {
        self.clamped(width, height)
    }

    /// Size at which a vector source is rasterized before resizing.
    ///
    /// FACTOR renders at `4 / scale` of the document size when the scale is
    /// below 4; DP modes render at four times the 1x size when that stays
    /// below the document size. Otherwise the document size is used as is.
    pub fn hq_svg_dimension(&self, source: Dimension) -> Dimension {
        match self.mode {
            ScaleMode::Factor if self.value < SVG_UPSCALE_FACTOR => {
                let factor = SVG_UPSCALE_FACTOR / self.value;
                self.clamped(f64::from(source.width) * factor, f64::from(source.height) * factor)
            }
            ScaleMode::DpWidth if self.value * SVG_UPSCALE_FACTOR < f64::from(source.width) => {
                let factor = self.value / f64::from(source.width) * SVG_UPSCALE_FACTOR;
                self.clamped(f64::from(source.width) * factor, f64::from(source.height) * factor)
            }
            ScaleMode::DpHeight if self.value * SVG_UPSCALE_FACTOR < f64::from(source.height) => {
                let factor = self.value / f64::from(source.height) * SVG_UPSCALE_FACTOR;
                self.clamped(f64::from(source.width) * factor, f64::from(source.height) * factor)
            }
            _ => source,
        }
    }

    fn clamped(&self, width: f64, height: f64) -> Dimension {
        Dimension::new(
            self.rounding.round(width).max(1),
            self.rounding.round(height).max(1),
        )
    }
}
