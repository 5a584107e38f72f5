// Command-line entry point: reads a JSON settings file and runs one batch.
// All conversion logic lives in the library crate.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use density_converter_lib::{Config, ConvertSettings, execute};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_settings(path: &Path) -> Result<ConvertSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid settings file {}", path.display()))
}

fn run() -> Result<bool> {
    let Some(settings_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: dconvert <settings.json>");
    };

    let settings = load_settings(&settings_path)?;
    let config = Config::from_settings(settings).context("Invalid configuration")?;

    info!(
        "=== Converting {} file(s) to {} ===",
        config.files_to_process().len(),
        config.destination.display()
    );

    let (tx, rx) = mpsc::channel();
    let handle = execute(
        config,
        |fraction| debug!("Progress: {:.0}%", fraction * 100.0),
        move |report| {
            let _ = tx.send(report);
        },
    )?;

    let report = rx.recv().context("Batch thread exited without a report")??;
    if handle.join().is_err() {
        bail!("Batch thread panicked");
    }

    println!("{}", report.summary());
    for error in &report.errors {
        eprintln!("error: {}", error);
    }

    Ok(!report.has_errors())
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("dconvert: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
