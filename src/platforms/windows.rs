use std::path::{Path, PathBuf};
use crate::core::{Config, Dimension};
use super::{DensityDescriptor, Platform, PlatformProfile, platform_root};

const DENSITIES: [DensityDescriptor; 4] = [
    DensityDescriptor::new(1.0, "100", ".scale-100"),
    DensityDescriptor::new(1.4, "140", ".scale-140"),
    DensityDescriptor::new(1.8, "180", ".scale-180"),
    DensityDescriptor::new(2.4, "240", ".scale-240"),
];

/// Windows app assets with scale qualifiers in the file name.
pub struct WindowsProfile;

impl PlatformProfile for WindowsProfile {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn converter_name(&self) -> &'static str {
        "windows-converter"
    }

    fn active_densities(&self, _config: &Config) -> Vec<DensityDescriptor> {
        DENSITIES.to_vec()
    }

    fn root_output_folder(&self, destination: &Path, _base_name: &str, config: &Config) -> PathBuf {
        platform_root(destination, Platform::Windows, config).join("Assets")
    }

    fn output_folder_for(
        &self,
        root: &Path,
        _density: &DensityDescriptor,
        _dimension: Dimension,
        _config: &Config,
    ) -> PathBuf {
        root.to_path_buf()
    }

    fn output_base_name(
        &self,
        density: &DensityDescriptor,
        _dimension: Dimension,
        base_name: &str,
        _config: &Config,
    ) -> String {
        format!("{}{}", base_name, density.folder_or_postfix)
    }
}
