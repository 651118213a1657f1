//! CLI argument parsing
//!
//! Defines the command-line interface using clap.

use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Run test cases from a pre-built test binary in parallel
///
/// Test names must be listed one per line on stdin.
#[derive(Parser, Debug)]
#[command(name = "partest")]
#[command(version)]
#[command(about = "Fan test cases out to parallel invocations of a compiled test binary")]
pub struct Args {
    /// File path of the compiled test binary
    #[arg(
        short = 'f',
        long = "binary",
        value_name = "PATH",
        value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from)
    )]
    pub binary: PathBuf,

    /// Number of tests to execute in parallel
    #[arg(short = 'p', long = "parallelism", value_name = "N", default_value = "1")]
    pub parallelism: usize,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
