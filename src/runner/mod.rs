//! Test invocation
//!
//! Runs a single named test case against the compiled test binary and
//! captures its output.

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Verbosity flag understood by the test binary
const VERBOSE_FLAG: &str = "-test.v";

/// Test-selection filter flag understood by the test binary
const RUN_FLAG: &str = "-test.run";

/// Runs individual test cases as subprocesses of one test binary
#[derive(Clone, Debug)]
pub struct TestRunner {
    binary: PathBuf,
}

impl TestRunner {
    /// Create a runner for the given test binary
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Path of the binary under test
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Build the anchored selection pattern for one test name.
    ///
    /// Anchoring prevents partial-name collisions from running
    /// unintended tests (`Test` would otherwise match `TestFoo`).
    pub fn filter_pattern(test_name: &str) -> String {
        format!("^{test_name}$")
    }

    /// Run one test case and return its combined captured output.
    ///
    /// Stdout and stderr are captured into a single text buffer. A
    /// non-zero exit or a spawn failure is absorbed into that buffer
    /// rather than raised: a failed invocation still yields a result
    /// message for the collector.
    pub async fn run(&self, test_name: &str) -> String {
        let pattern = Self::filter_pattern(test_name);
        debug!("invoking {} {} {} {}", self.binary.display(), VERBOSE_FLAG, RUN_FLAG, pattern);

        let output = Command::new(&self.binary)
            .arg(VERBOSE_FLAG)
            .arg(RUN_FLAG)
            .arg(&pattern)
            .output()
            .await;

        let mut captured = String::new();
        match output {
            Ok(output) => {
                captured.push_str(&String::from_utf8_lossy(&output.stdout));
                captured.push_str(&String::from_utf8_lossy(&output.stderr));
                if !output.status.success() {
                    captured.push_str(&format!("{}\n", output.status));
                }
            }
            Err(e) => {
                captured.push_str(&format!("{e}\n"));
            }
        }

        captured
    }
}
