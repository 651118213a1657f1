//! partest - parallel test-case dispatcher
//!
//! Reads test-case names from stdin, fans them out to a bounded pool of
//! concurrent workers, each of which invokes a pre-built test binary
//! filtered to exactly that test case, streams captured output back
//! through a single collector, and prints a pass/fail summary with
//! elapsed wall time.
//!
//! ## Usage
//!
//! ```bash
//! # Run the listed tests, four at a time
//! partest -f ./pkg.test -p 4 < test-names.txt
//!
//! # Names come one per line on stdin
//! echo "TestParseConfig" | partest -f ./pkg.test
//! ```
//!
//! The test binary is invoked as `<binary> -test.v -test.run "^<name>$"`
//! for each test case; the anchored filter keeps partial name matches
//! from running unintended tests.

use anyhow::Result;
use clap::Parser;
use std::io;

mod cli;
mod config;
mod executor;
mod input;
mod models;
mod runner;
mod utils;

use cli::Args;
use config::RunConfig;
use executor::DispatchEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    utils::init_logger(args.verbose);

    let config = RunConfig::from_args(&args)?;
    let test_names = input::read_test_names(io::stdin().lock())?;

    let engine = DispatchEngine::new(&config);
    let mut stdout = io::stdout();
    let summary = engine.run(test_names, &mut stdout).await?;

    println!("{summary}");
    Ok(())
}
