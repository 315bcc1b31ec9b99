use std::ffi::OsString;
use std::path::PathBuf;
use clap::Parser;

/// Printed whenever the arguments are not exactly `<input> <output> <platform>`.
pub const USAGE: &str = "Please insert your input assets directory, output directory and your platform(iOS or Android) \n\
Example: svg-assetgen ~/Documents/YOUR_INPUT_ASSET ~/Documents/YOUR_OUTPUT_ASSET ios";

/// Number of arguments after the program name.
const EXPECTED_ARGS: usize = 3;

/// Generate iOS or Android PNG asset sets from a folder of SVG files
///
/// Only the three positionals are recognised; `--help` and friends are
/// plain values like any other word.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "svg-assetgen", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Directory holding the .svg sources
    #[arg(allow_hyphen_values = true)]
    pub input_dir: PathBuf,
    /// Existing directory that receives iOSAssets/ or AndroidAssets/
    #[arg(allow_hyphen_values = true)]
    pub output_dir: PathBuf,
    /// Target platform, ios or android (any case)
    #[arg(allow_hyphen_values = true)]
    pub platform: String,
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    Generate(Cli),
    /// Wrong argument count or shape
    Usage,
}

/// Parses `args` (program name first). Never fails: bad input maps to [`Invocation::Usage`].
///
/// The raw count is checked before clap sees the arguments, so a `--`
/// separator counts as an argument like any other.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len().saturating_sub(1) != EXPECTED_ARGS {
        return Invocation::Usage;
    }

    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Generate(cli),
        Err(_) => Invocation::Usage,
    }
}
