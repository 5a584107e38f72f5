use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use image::{Rgba, RgbaImage};
use density_converter_lib::{
    Config, ConvertSettings, OutputCompressionMode, Platform, PlatformTarget, ScaleMode, convert, execute,
};

fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 7) as u8, (y * 5) as u8, 128, 255]))
        .save(&path)
        .unwrap();
    path
}

fn dimensions(path: &Path) -> (u32, u32) {
    let image = image::open(path).unwrap();
    (image.width(), image.height())
}

fn config(source: &Path, out: &Path, tweak: impl FnOnce(&mut ConvertSettings)) -> Config {
    let mut settings = ConvertSettings {
        destination: Some(out.to_path_buf()),
        ..ConvertSettings::new(source, 4.0)
    };
    tweak(&mut settings);
    Config::from_settings(settings).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn all_platforms_get_their_layout() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_png(src.path(), "icon.png", 96, 96);

    let report = convert(config(src.path(), out.path(), |_| {}), |_| {}).await.unwrap();

    assert!(!report.has_errors(), "{:?}", report.errors);
    assert_eq!(report.total_jobs, 4);
    assert_eq!(report.succeeded_jobs, 4);

    let root = out.path();
    assert_eq!(dimensions(&root.join("android/drawable-mdpi/icon.png")), (24, 24));
    assert_eq!(dimensions(&root.join("android/drawable-xxxhdpi/icon.png")), (96, 96));
    assert_eq!(dimensions(&root.join("web/img/icon-1x.png")), (24, 24));
    assert_eq!(dimensions(&root.join("web/img/icon-2x.png")), (48, 48));
    assert_eq!(dimensions(&root.join("ios/AssetCatalog/icon.imageset/icon@3x.png")), (72, 72));
    assert_eq!(dimensions(&root.join("windows/Assets/icon.scale-140.png")), (34, 34));

    let manifest = fs::read_to_string(root.join("ios/AssetCatalog/icon.imageset/Contents.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(manifest["images"].as_array().unwrap().len(), 3);
    assert_eq!(manifest["images"][1]["filename"], "icon@2x.png");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn second_run_with_skip_existing_writes_nothing() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_png(src.path(), "a.png", 40, 40);
    write_png(src.path(), "b.png", 40, 20);
    let config = config(src.path(), out.path(), |s| {
        s.skip_existing_files = true;
        s.platform_target = PlatformTarget::Android;
    });

    let first = convert(config.clone(), |_| {}).await.unwrap();
    assert_eq!(first.produced_files.len(), 10);
    let written = out.path().join("drawable-hdpi/b.png");
    let modified = fs::metadata(&written).unwrap().modified().unwrap();

    let second = convert(config, |_| {}).await.unwrap();
    assert!(second.produced_files.is_empty());
    assert!(!second.has_errors());
    assert_eq!(second.finished_count, first.finished_count);
    assert_eq!(fs::metadata(&written).unwrap().modified().unwrap(), modified);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn second_run_for_all_platforms_keeps_every_file() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_png(src.path(), "icon.png", 48, 48);
    let config = config(src.path(), out.path(), |s| s.skip_existing_files = true);

    let first = convert(config.clone(), |_| {}).await.unwrap();
    assert!(!first.has_errors(), "{:?}", first.errors);

    let manifest = out.path().join("ios/AssetCatalog/icon.imageset/Contents.json");
    fs::write(&manifest, "hand edited").unwrap();
    let modified: Vec<_> = first
        .produced_files
        .iter()
        .map(|f| fs::metadata(&f.path).unwrap().modified().unwrap())
        .collect();

    let second = convert(config, |_| {}).await.unwrap();

    assert!(second.produced_files.is_empty());
    assert!(!second.has_errors());
    assert_eq!(fs::read_to_string(&manifest).unwrap(), "hand edited");
    for (file, before) in first.produced_files.iter().zip(modified) {
        assert_eq!(fs::metadata(&file.path).unwrap().modified().unwrap(), before, "{}", file.path.display());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn halt_on_error_stops_after_corrupt_first_file() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(src.path().join("a_broken.png"), b"not an image").unwrap();
    write_png(src.path(), "b.png", 16, 16);
    write_png(src.path(), "c.png", 16, 16);
    let config = config(src.path(), out.path(), |s| {
        s.halt_on_error = true;
        s.worker_count = 1;
        s.platform_target = PlatformTarget::Web;
    });

    let report = convert(config, |_| {}).await.unwrap();

    assert!(report.halted);
    assert_eq!(report.finished_jobs, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].source, src.path().join("a_broken.png"));
    assert_eq!(report.errors[0].platform, Platform::Web);
    assert_eq!(report.skipped_jobs.len(), 2);
    assert!(!out.path().join("img/b-1x.png").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failures_without_halt_do_not_stop_other_jobs() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(src.path().join("a_broken.png"), b"not an image").unwrap();
    write_png(src.path(), "b.png", 16, 16);
    let config = config(src.path(), out.path(), |s| s.platform_target = PlatformTarget::Web);

    let report = convert(config, |_| {}).await.unwrap();

    assert!(!report.halted);
    assert_eq!(report.finished_jobs, 2);
    assert_eq!(report.succeeded_jobs, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(out.path().join("img/b-2x.png").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn finished_count_excludes_upscaled_buckets() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_png(src.path(), "a.png", 50, 50);
    write_png(src.path(), "b.png", 30, 60);
    let config = config(src.path(), out.path(), |s| {
        s.scale_value = 2.0;
        s.skip_upscaling = true;
        s.platform_target = PlatformTarget::Android;
    });

    let report = convert(config, |_| {}).await.unwrap();

    // mdpi, hdpi, xhdpi per file; xxhdpi and xxxhdpi would upscale
    assert_eq!(report.finished_count, 6);
    assert_eq!(report.produced_files.len(), 6);
    assert!(!out.path().join("drawable-xxhdpi").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dp_width_mode_sizes_by_width() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let file = write_png(src.path(), "banner.png", 300, 120);
    let config = config(&file, out.path(), |s| {
        s.scale_mode = ScaleMode::DpWidth;
        s.scale_value = 150.0;
        s.platform_target = PlatformTarget::Web;
    });

    let report = convert(config, |_| {}).await.unwrap();

    assert!(!report.has_errors());
    assert_eq!(dimensions(&out.path().join("img/banner-1x.png")), (150, 60));
    assert_eq!(dimensions(&out.path().join("img/banner-2x.png")), (300, 120));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn jpg_and_png_mode_writes_both_files() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_png(src.path(), "photo.png", 20, 20);
    let config = config(src.path(), out.path(), |s| {
        s.output_compression_mode = OutputCompressionMode::AsJpgAndPng;
        s.platform_target = PlatformTarget::Web;
    });

    let report = convert(config, |_| {}).await.unwrap();

    assert_eq!(report.produced_files.len(), 4);
    for name in ["photo-1x.jpg", "photo-1x.png", "photo-2x.jpg", "photo-2x.png"] {
        assert!(out.path().join("img").join(name).exists(), "{name}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dry_run_plans_without_writing() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("assets");
    write_png(src.path(), "icon.png", 32, 32);
    let config = config(src.path(), &target, |s| s.dry_run = true);

    let report = convert(config, |_| {}).await.unwrap();

    assert!(!report.has_errors());
    assert_eq!(report.produced_files.len(), 5 + 2 + 3 + 4);
    assert!(report.produced_files.iter().all(|f| f.size_bytes == 0));
    assert!(report.log.contains("dry run: "));
    assert!(!target.exists());
}

#[test]
fn execute_reports_progress_and_finishes() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_png(src.path(), "a.png", 12, 12);
    write_png(src.path(), "b.png", 12, 12);
    let config = config(src.path(), out.path(), |s| {
        s.worker_count = 2;
        s.platform_target = PlatformTarget::Windows;
    });

    let (progress_tx, progress_rx) = mpsc::channel();
    let (done_tx, done_rx) = mpsc::channel();
    let handle = execute(
        config,
        move |fraction| {
            let _ = progress_tx.send(fraction);
        },
        move |report| {
            let _ = done_tx.send(report);
        },
    )
    .unwrap();

    let report = done_rx.recv().unwrap().unwrap();
    handle.join().unwrap();

    assert_eq!(report.finished_jobs, 2);
    assert_eq!(report.finished_count, 8);

    let fractions: Vec<f32> = progress_rx.try_iter().collect();
    assert_eq!(fractions.first().copied(), Some(0.0));
    assert_eq!(fractions.last().copied(), Some(1.0));
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
}
