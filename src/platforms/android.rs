use std::path::{Path, PathBuf};
use crate::core::{Config, Dimension};
use super::{DensityDescriptor, Platform, PlatformProfile, platform_root};

const LOW_DENSITIES: [DensityDescriptor; 2] = [
    DensityDescriptor::new(0.75, "ldpi", "drawable-ldpi"),
    DensityDescriptor::new(1.33, "tvdpi", "drawable-tvdpi"),
];

const DENSITIES: [DensityDescriptor; 5] = [
    DensityDescriptor::new(1.0, "mdpi", "drawable-mdpi"),
    DensityDescriptor::new(1.5, "hdpi", "drawable-hdpi"),
    DensityDescriptor::new(2.0, "xhdpi", "drawable-xhdpi"),
    DensityDescriptor::new(3.0, "xxhdpi", "drawable-xxhdpi"),
    DensityDescriptor::new(4.0, "xxxhdpi", "drawable-xxxhdpi"),
];

/// Android resource sets. Density lives in the folder name, so file names
/// stay unchanged.
pub struct AndroidProfile;

impl PlatformProfile for AndroidProfile {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn converter_name(&self) -> &'static str {
        "android-converter"
    }

    fn active_densities(&self, config: &Config) -> Vec<DensityDescriptor> {
        let mut densities = Vec::with_capacity(LOW_DENSITIES.len() + DENSITIES.len());
        if config.include_low_density_android_buckets {
            densities.extend_from_slice(&LOW_DENSITIES);
        }
        densities.extend_from_slice(&DENSITIES);
        densities
    }

    fn root_output_folder(&self, destination: &Path, _base_name: &str, config: &Config) -> PathBuf {
        platform_root(destination, Platform::Android, config)
    }

    fn output_folder_for(
        &self,
        root: &Path,
        density: &DensityDescriptor,
        _dimension: Dimension,
        config: &Config,
    ) -> PathBuf {
        if config.use_mipmap_folder_naming {
            root.join(density.folder_or_postfix.replace("drawable", "mipmap"))
        } else {
            root.join(density.folder_or_postfix)
        }
    }

    fn output_base_name(
        &self,
        _density: &DensityDescriptor,
        _dimension: Dimension,
        base_name: &str,
        _config: &Config,
    ) -> String {
        base_name.to_string()
    }
}
