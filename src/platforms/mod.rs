//! Platform profiles.
//!
//! Each target platform supplies its density set and its output layout
//! through [`PlatformProfile`]. The set of platforms is closed: dispatch goes
//! through the [`Platform`] tag, which hands out the matching profile.
//!
//! - [`AndroidProfile`]: `drawable-<bucket>` / `mipmap-<bucket>` folders
//! - [`IosProfile`]: `<name>.imageset` folders with a `Contents.json` manifest
//! - [`WebProfile`]: one `img/` folder, `-1x` / `-2x` postfixes
//! - [`WindowsProfile`]: one `Assets/` folder, `.scale-NNN` postfixes

mod android;
mod ios;
mod web;
mod windows;

use std::fmt;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::{Config, Dimension, ProducedFile};
use crate::utils::{ConverterResult, ImageType};

pub use android::AndroidProfile;
pub use ios::IosProfile;
pub use web::WebProfile;
pub use windows::WindowsProfile;

/// A named output resolution tier relative to the 1x baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityDescriptor {
    /// Multiplier relative to 1x
    pub scale: f64,
    /// Canonical bucket name, e.g. `xhdpi` or `2x`
    pub name: &'static str,
    /// Folder name or file name postfix, depending on the platform
    pub folder_or_postfix: &'static str,
}

impl DensityDescriptor {
    pub const fn new(scale: f64, name: &'static str, folder_or_postfix: &'static str) -> Self {
        Self {
            scale,
            name,
            folder_or_postfix,
        }
    }
}

/// A concrete output platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Android,
    Ios,
    Web,
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Self::Android, Self::Ios, Self::Web, Self::Windows];

    /// Profile implementing this platform's layout rules
    pub fn profile(self) -> &'static dyn PlatformProfile {
        match self {
            Self::Android => &AndroidProfile,
            Self::Ios => &IosProfile,
            Self::Web => &WebProfile,
            Self::Windows => &WindowsProfile,
        }
    }

    /// Name of the per-platform folder used when several platforms are active
    pub fn folder_name(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Web => "web",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// Configured platform selection; `ALL` expands to every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformTarget {
    #[default]
    All,
    Android,
    Ios,
    Web,
    Windows,
}

impl PlatformTarget {
    pub fn platforms(self) -> Vec<Platform> {
        match self {
            Self::All => Platform::ALL.to_vec(),
            Self::Android => vec![Platform::Android],
            Self::Ios => vec![Platform::Ios],
            Self::Web => vec![Platform::Web],
            Self::Windows => vec![Platform::Windows],
        }
    }
}

/// Everything a pre/post hook may need about the image being converted.
pub struct HookContext<'a> {
    /// Root output folder of the image, already created
    pub root: &'a Path,
    pub base_name: &'a str,
    /// Densities that will be rendered, ascending
    pub densities: &'a [DensityDescriptor],
    pub image_type: ImageType,
    pub config: &'a Config,
}

/// Layout and density rules of one platform.
///
/// Implementations are pure path/name computations; folder creation and
/// encoding are driven by the shared converter template.
pub trait PlatformProfile: Send + Sync {
    fn platform(&self) -> Platform;

    /// Name used as the prefix of job log lines
    fn converter_name(&self) -> &'static str;

    /// Densities generated for this platform, ascending by scale
    fn active_densities(&self, config: &Config) -> Vec<DensityDescriptor>;

    /// Folder receiving all output of one source image
    fn root_output_folder(&self, destination: &Path, base_name: &str, config: &Config) -> PathBuf;

    /// Folder receiving the output of one density
    fn output_folder_for(
        &self,
        root: &Path,
        density: &DensityDescriptor,
        dimension: Dimension,
        config: &Config,
    ) -> PathBuf;

    /// Output file name without extension
    fn output_base_name(
        &self,
        density: &DensityDescriptor,
        dimension: Dimension,
        base_name: &str,
        config: &Config,
    ) -> String;

    /// Runs once per source image before its density loop
    fn pre_execute(&self, _ctx: &HookContext<'_>) -> ConverterResult<()> {
        Ok(())
    }

    /// Runs once per source image after its density loop
    fn post_execute(&self, _ctx: &HookContext<'_>, _produced: &[ProducedFile]) -> ConverterResult<()> {
        Ok(())
    }
}

/// `destination/<platform>` when several platforms are active, else `destination`.
fn platform_root(destination: &Path, platform: Platform, config: &Config) -> PathBuf {
    if config.has_multiple_platforms() {
        destination.join(platform.folder_name())
    } else {
        destination.to_path_buf()
    }
}
