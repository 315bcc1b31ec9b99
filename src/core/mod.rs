//! Core types for an asset run.
//!
//! - [`Job`]: input/output directories and target platform
//! - [`Platform`] and [`Variant`]: the compiled-in iOS and Android profiles
//! - [`ProgressCounter`]: completed/expected bookkeeping
//! - [`GeneratorConfig`]: tunables read from the environment

mod config;
mod job;
mod platform;
mod progress;

pub use config::{GeneratorConfig, WORKERS_ENV};
pub use job::Job;
pub use platform::{Platform, Variant};
pub use progress::{ProgressCounter, ProgressLine};
