// This is the command-line entry point for the asset generator.
// All behaviour lives in the library; this file wires up logging, arguments and exit status.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use svg_assetgen::{GeneratorConfig, Invocation, Outcome, SvgRasterizer, USAGE, generate_assets, parse_args};

fn main() -> ExitCode {
    // stdout carries usage and progress lines only; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = match parse_args(std::env::args_os()) {
        Invocation::Generate(cli) => cli,
        Invocation::Usage => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: svg_assetgen::Cli) -> anyhow::Result<()> {
    let config = GeneratorConfig::from_env();
    info!("=== Asset generation starting ({} workers) ===", config.workers);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let outcome = runtime.block_on(generate_assets(
        &cli.input_dir,
        &cli.output_dir,
        &cli.platform,
        Arc::new(SvgRasterizer::with_system_fonts()),
        &config,
        std::io::stdout(),
    ))
    .with_context(|| format!("generating {} assets from {}", cli.platform, cli.input_dir.display()))?;

    if let Outcome::Generated(report) = outcome {
        info!("Wrote {} files to {}", report.completed, report.platform_dir.display());
    }
    Ok(())
}
