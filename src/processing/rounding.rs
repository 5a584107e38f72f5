//! Conversion of real-valued pixel computations into whole pixels.

use serde::{Deserialize, Serialize};

/// Tie-breaking rule applied wherever a computed dimension becomes a pixel count.
///
/// The same raw value can legitimately differ by one pixel between policies,
/// so every dimension in a batch goes through the one configured policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingPolicy {
    /// Nearest integer, `.5` rounds up for positive values
    #[default]
    RoundHalfUp,
    /// Smallest integer not below the value
    Ceil,
    /// Largest integer not above the value
    Floor,
}

impl RoundingPolicy {
    /// Rounds `raw` to a pixel count. Negative and NaN inputs yield 0,
    /// values beyond `u32::MAX` saturate.
    pub fn round(&self, raw: f64) -> u32 {
        let rounded = match self {
            Self::RoundHalfUp => raw.round(),
            Self::Ceil => raw.ceil(),
            Self::Floor => raw.floor(),
        };
        // float -> int casts saturate in Rust
        rounded as u32
    }
}
