use std::path::{Path, PathBuf};
use crate::core::{Config, Dimension};
use super::{DensityDescriptor, Platform, PlatformProfile, platform_root};

const DENSITIES: [DensityDescriptor; 2] = [
    DensityDescriptor::new(1.0, "1x", "-1x"),
    DensityDescriptor::new(2.0, "2x", "-2x"),
];

/// CSS `image-set` style assets: one shared `img/` folder, density as postfix.
pub struct WebProfile;

impl PlatformProfile for WebProfile {
    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn converter_name(&self) -> &'static str {
        "web-converter"
    }

    fn active_densities(&self, _config: &Config) -> Vec<DensityDescriptor> {
        DENSITIES.to_vec()
    }

    fn root_output_folder(&self, destination: &Path, _base_name: &str, config: &Config) -> PathBuf {
        platform_root(destination, Platform::Web, config).join("img")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::PlatformTarget;
    use crate::platforms::test_support::config_for;

    #[test]
    fn shares_img_folder_and_postfixes_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), PlatformTarget::Web, |_| {});
        let dst = Path::new("/site");
        let dim = Dimension::new(20, 20);

        let root = WebProfile.root_output_folder(dst, "logo", &config);
        assert_eq!(root, dst.join("img"));
        for density in &DENSITIES {
            assert_eq!(WebProfile.output_folder_for(&root, density, dim, &config), root);
        }
        assert_eq!(WebProfile.output_base_name(&DENSITIES[0], dim, "logo", &config), "logo-1x");
        assert_eq!(WebProfile.output_base_name(&DENSITIES[1], dim, "logo", &config), "logo-2x");
    }

    #[test]
    fn nests_under_web_with_several_platforms() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), PlatformTarget::All, |_| {});
        let dst = Path::new("/site");
        assert_eq!(
            WebProfile.root_output_folder(dst, "logo", &config),
            dst.join("web").join("img")
        );
    }
}
