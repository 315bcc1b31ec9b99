// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod worker;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{GeneratorConfig, Job, Platform, ProgressCounter, ProgressLine, Variant};
pub use crate::processing::{AssetGenerator, GenerationReport, Rasterizer, SvgRasterizer};
pub use crate::utils::{AssetError, AssetResult};
pub use crate::commands::*;

// The binary in main.rs is a thin wrapper around `commands`.
