//! The `generate` command: one job from arguments to finished assets.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use crate::core::{GeneratorConfig, Job};
use crate::processing::{AssetGenerator, GenerationReport, Rasterizer};
use crate::utils::{AssetError, AssetResult};

/// How a `generate` invocation ended without a fatal error.
#[derive(Debug)]
pub enum Outcome {
    /// Platform name was not recognised; nothing was touched
    Unsupported(String),
    Generated(GenerationReport),
}

/// Generates the assets for `platform` from `input_dir` into `output_dir`.
///
/// An unknown platform is not an error: its diagnostic is written to `out`
/// and no work is done. Progress lines go to `out` as renders complete.
pub async fn generate_assets<W: Write + Send + 'static>(
    input_dir: impl Into<PathBuf>,
    output_dir: impl Into<PathBuf>,
    platform: &str,
    rasterizer: Arc<dyn Rasterizer>,
    config: &GeneratorConfig,
    mut out: W,
) -> AssetResult<Outcome> {
    let job = match Job::new(input_dir, output_dir, platform) {
        Ok(job) => job,
        Err(err @ AssetError::UnsupportedPlatform(_)) => {
            writeln!(out, "{err}")?;
            return Ok(Outcome::Unsupported(platform.to_string()));
        }
        Err(err) => return Err(err),
    };

    debug!(
        "Generating {} assets from {} into {}",
        job.platform(),
        job.input_dir().display(),
        job.output_dir().display()
    );

    let generator = AssetGenerator::new(job, rasterizer, config);
    let report = generator.generate(out).await?;
    Ok(Outcome::Generated(report))
}
