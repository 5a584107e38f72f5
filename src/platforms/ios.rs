use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::debug;
use crate::core::{Config, Dimension};
use crate::utils::{ConverterError, ConverterResult};
use super::{DensityDescriptor, HookContext, Platform, PlatformProfile, platform_root};

const DENSITIES: [DensityDescriptor; 3] = [
    DensityDescriptor::new(1.0, "1x", ""),
    DensityDescriptor::new(2.0, "2x", "@2x"),
    DensityDescriptor::new(3.0, "3x", "@3x"),
];

pub const MANIFEST_NAME: &str = "Contents.json";

#[derive(Serialize)]
struct Manifest<'a> {
    images: Vec<ManifestImage>,
    info: ManifestInfo<'a>,
}

#[derive(Serialize)]
struct ManifestImage {
    idiom: &'static str,
    filename: String,
    scale: &'static str,
}

#[derive(Serialize)]
struct ManifestInfo<'a> {
    version: u32,
    author: &'a str,
}

/// Xcode asset catalog layout: one `<name>.imageset` per source image.
pub struct IosProfile;

impl IosProfile {
    fn manifest(ctx: &HookContext<'_>) -> Manifest<'static> {
        let extension = ctx
            .config
            .output_compression_mode
            .compressions_for(ctx.image_type)
            .first()
            .map(|c| c.extension())
            .unwrap_or("png");

        let images = ctx
            .densities
            .iter()
            .map(|density| ManifestImage {
                idiom: "universal",
                filename: format!("{}{}.{}", ctx.base_name, density.folder_or_postfix, extension),
                scale: density.name,
            })
            .collect();

        Manifest {
            images,
            info: ManifestInfo { version: 1, author: "xcode" },
        }
    }
}

impl PlatformProfile for IosProfile {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn converter_name(&self) -> &'static str {
        "ios-converter"
    }

    fn active_densities(&self, _config: &Config) -> Vec<DensityDescriptor> {
        DENSITIES.to_vec()
    }

    fn root_output_folder(&self, destination: &Path, base_name: &str, config: &Config) -> PathBuf {
        platform_root(destination, Platform::Ios, config)
            .join("AssetCatalog")
            .join(format!("{}.imageset", base_name))
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

    fn pre_execute(&self, ctx: &HookContext<'_>) -> ConverterResult<()> {
        if ctx.config.dry_run {
            return Ok(());
        }

        let path = ctx.root.join(MANIFEST_NAME);
        if ctx.config.skip_existing_files && path.exists() {
            debug!("Keeping existing asset catalog manifest {}", path.display());
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&Self::manifest(ctx))
            .map_err(|e| ConverterError::processing(format!("Failed to serialize manifest: {}", e)))?;
        fs::write(&path, json)?;
        debug!("Wrote asset catalog manifest {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::PlatformTarget;
    use crate::platforms::test_support::config_for;
    use crate::utils::{ImageType, OutputCompressionMode};

    #[test]
    fn imageset_folder_and_scale_postfix() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), PlatformTarget::Ios, |_| {});
        let dim = Dimension::new(10, 10);
        let root = IosProfile.root_output_folder(Path::new("/proj"), "star", &config);
        assert_eq!(root, Path::new("/proj/AssetCatalog/star.imageset"));
        assert_eq!(IosProfile.output_base_name(&DENSITIES[0], dim, "star", &config), "star");
        assert_eq!(IosProfile.output_base_name(&DENSITIES[2], dim, "star", &config), "star@3x");
    }

    #[test]
    fn pre_hook_writes_manifest_for_rendered_densities() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), PlatformTarget::Ios, |s| {
            s.output_compression_mode = OutputCompressionMode::AsJpg;
        });
        let ctx = HookContext {
            root: dir.path(),
            base_name: "star",
            densities: &DENSITIES[..2],
            image_type: ImageType::PNG,
            config: &config,
        };
        IosProfile.pre_execute(&ctx).unwrap();

        let raw = fs::read_to_string(dir.path().join(MANIFEST_NAME)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let images = json["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1]["filename"], "star@2x.jpg");
        assert_eq!(images[1]["scale"], "2x");
        assert_eq!(images[0]["idiom"], "universal");
        assert_eq!(json["info"]["author"], "xcode");
    }

    #[test]
    fn dry_run_writes_no_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), PlatformTarget::Ios, |s| s.dry_run = true);
        let ctx = HookContext {
            root: dir.path(),
            base_name: "star",
            densities: &DENSITIES,
            image_type: ImageType::PNG,
            config: &config,
        };
        IosProfile.pre_execute(&ctx).unwrap();
        assert!(!dir.path().join(MANIFEST_NAME).exists());
    }

    #[test]
    fn skip_existing_keeps_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), PlatformTarget::Ios, |s| s.skip_existing_files = true);
        let manifest = dir.path().join(MANIFEST_NAME);
        fs::write(&manifest, "hand edited").unwrap();
        let ctx = HookContext {
            root: dir.path(),
            base_name: "star",
            densities: &DENSITIES,
            image_type: ImageType::PNG,
            config: &config,
        };
        IosProfile.pre_execute(&ctx).unwrap();
        assert_eq!(fs::read_to_string(&manifest).unwrap(), "hand edited");
    }
}
