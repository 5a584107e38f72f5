// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod platforms;
pub mod processing;
pub mod worker;
pub mod commands;

// Public exports for external consumers
pub use self::core::{BatchReport, Config, ConvertSettings, ConversionJob, Dimension, Progress, ProgressType};
pub use platforms::{Platform, PlatformTarget};
pub use processing::{RoundingPolicy, ScaleMode};
pub use utils::{ConverterError, ConverterResult, OutputCompressionMode};
pub use commands::*;

// This library file is used as a public API for consuming this crate as a library.
// The command-line entry point is in main.rs.
