//! Command-line entry points.
//!
//! - [`parse_args`]: turns `argv` into an [`Invocation`]
//! - [`generate_assets`]: runs one generation job

mod cli;
mod generate;

pub use cli::{Cli, Invocation, USAGE, parse_args};
pub use generate::{Outcome, generate_assets};
