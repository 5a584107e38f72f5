//! Per-image conversion template shared by every platform.
//!
//! The platform profile only answers layout questions; decoding, bucket
//! computation, folder creation, encoding and hooks all happen here so the
//! flow is identical for Android, iOS, Web and Windows.

use std::fmt::Write as _;
use std::fs;
use image::DynamicImage;
use tracing::debug;
use crate::core::{Config, ConversionJob, Dimension, JobOutput, ProducedFile};
use crate::platforms::HookContext;
use crate::utils::{
    ConverterError, ConverterResult, ImageType, create_and_check_folder, file_stem, image_type_from_path,
};
use super::codec::ImageCodec;
use super::postprocess::{enabled_post_processors, run_post_processors};
use super::ScalingEngine;

const BYTES_PER_KB: f64 = 1024.0;

/// Decodes the job's source. Returns the native dimension used for bucket
/// computation and the raster every density is resized from.
///
/// Vector sources are rasterized once at the high-quality master size.
fn load_source(
    job: &ConversionJob,
    image_type: ImageType,
    engine: &ScalingEngine,
    codec: &dyn ImageCodec,
) -> ConverterResult<(Dimension, DynamicImage)> {
    if image_type.is_vector() {
        let (width, height) = codec.svg_size(&job.source)?;
        let native = engine.document_dimension(width, height);
        let master = engine.hq_svg_dimension(native);
        debug!("Rasterizing {} at {} (document {})", job.source.display(), master, native);
        let raster = codec.rasterize_svg(&job.source, master)?;
        Ok((native, raster))
    } else {
        let raster = codec.decode(&job.source)?;
        Ok((Dimension::new(raster.width(), raster.height()), raster))
    }
}

/// Converts one source image for one platform.
///
/// Densities are processed in ascending scale order. A folder that cannot be
/// created aborts the remaining densities of this image with an error.
pub fn convert(job: &ConversionJob, config: &Config, codec: &dyn ImageCodec) -> ConverterResult<JobOutput> {
    let profile = job.platform.profile();
    let image_type = image_type_from_path(&job.source)?;
    let base_name = file_stem(&job.source)?;
    let engine = config.scaling_engine();

    let (native, raster) = load_source(job, image_type, &engine, codec)?;
    let buckets = engine.compute_buckets(native, &profile.active_densities(config));

    let mut log = String::new();
    let _ = writeln!(
        log,
        "{}: {} {} ({}{})",
        profile.converter_name(),
        base_name,
        native,
        engine.value(),
        engine.mode().unit()
    );

    let root = create_and_check_folder(
        profile.root_output_folder(&config.destination, &base_name, config),
        config.dry_run,
    )?;

    let rendered = buckets.densities();
    let ctx = HookContext {
        root: &root,
        base_name: &base_name,
        densities: &rendered,
        image_type,
        config,
    };
    profile.pre_execute(&ctx)?;

    let compressions = config.output_compression_mode.compressions_for(image_type);
    let mut files: Vec<ProducedFile> = Vec::new();

    for entry in &buckets {
        let folder = create_and_check_folder(
            profile.output_folder_for(&root, &entry.density, entry.dimension, config),
            config.dry_run,
        )?;
        let file_base = profile.output_base_name(&entry.density, entry.dimension, &base_name, config);

        let _ = writeln!(
            log,
            "process {} with {} (x{})",
            folder.join(&file_base).display(),
            entry.dimension,
            entry.density.scale
        );

        let mut resized: Option<DynamicImage> = None;
        let mut written = 0usize;

        for &compression in &compressions {
            let path = folder.join(format!("{}.{}", file_base, compression.extension()));

            if config.skip_existing_files && path.exists() {
                debug!("Skipping existing {}", path.display());
                continue;
            }

            written += 1;
            if config.dry_run {
                let _ = writeln!(log, "dry run: {}", path.display());
                files.push(ProducedFile {
                    path,
                    size_bytes: 0,
                    density: entry.density.name.to_string(),
                    dimension: entry.dimension,
                    compression,
                });
                continue;
            }

            let scaled = resized.get_or_insert_with(|| {
                codec.resize(&raster, entry.dimension, config.enable_anti_aliasing)
            });
            let bytes = codec.encode(scaled, compression, config.compression_quality)?;
            fs::write(&path, &bytes).map_err(|e| {
                ConverterError::io(format!("Failed to write {}: {}", path.display(), e))
            })?;

            let size_bytes = bytes.len() as u64;
            let _ = writeln!(
                log,
                "compressed to disk: {} ({:.2}kB)",
                path.display(),
                size_bytes as f64 / BYTES_PER_KB
            );
            files.push(ProducedFile {
                path,
                size_bytes,
                density: entry.density.name.to_string(),
                dimension: entry.dimension,
                compression,
            });
        }

        if written == 0 {
            log.push_str("files skipped\n");
        }
    }

    if !config.dry_run {
        let processors = enabled_post_processors(config);
        if !processors.is_empty() {
            run_post_processors(&processors, &mut files, config.compression_quality, &mut log);
        }
    }

    profile.post_execute(&ctx, &files)?;

    Ok(JobOutput {
        log,
        files,
        densities: buckets.len(),
    })
}
