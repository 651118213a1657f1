//! Run result models
//!
//! Defines the overall run status and the end-of-run summary.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Literal marker a test binary prints for a failed test case.
///
/// Failure detection for the summary relies solely on this substring
/// appearing in the captured output; a subprocess that exits non-zero
/// without printing it is not counted as a failure.
pub const FAIL_MARKER: &str = "--- FAIL";

/// Overall status of a test run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    Fail,
}

impl RunStatus {
    /// Derive the run status from the number of failed test cases
    pub fn from_failures(failed: usize) -> Self {
        if failed > 0 {
            RunStatus::Fail
        } else {
            RunStatus::Ok
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Ok => write!(f, "ok"),
            RunStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Summary of one complete run, computed once after every job has finished
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub status: RunStatus,
    pub binary: PathBuf,
    pub elapsed: Duration,
    pub total: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new(binary: PathBuf, elapsed: Duration, total: usize, failed: usize) -> Self {
        Self {
            status: RunStatus::from_failures(failed),
            binary,
            elapsed,
            total,
            failed,
        }
    }
}

impl fmt::Display for RunSummary {
    /// Formats the canonical summary line:
    /// `[ok|FAIL]    <binary-path>    <elapsed>s` with elapsed to
    /// millisecond precision and four spaces between fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}    {}    {:.3}s",
            self.status,
            self.binary.display(),
            self.elapsed.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_failures() {
        assert_eq!(RunStatus::from_failures(0), RunStatus::Ok);
        assert_eq!(RunStatus::from_failures(1), RunStatus::Fail);
        assert_eq!(RunStatus::from_failures(17), RunStatus::Fail);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(RunStatus::Ok.to_string(), "ok");
        assert_eq!(RunStatus::Fail.to_string(), "FAIL");
    }

    #[test]
    fn test_summary_line_format() {
        let summary = RunSummary::new(
            PathBuf::from("./pkg.test"),
            Duration::from_millis(1234),
            3,
            0,
        );
        assert_eq!(summary.to_string(), "ok    ./pkg.test    1.234s");
    }

    #[test]
    fn test_summary_line_failing() {
        let summary = RunSummary::new(PathBuf::from("/tmp/t.test"), Duration::from_secs(100), 5, 2);
        assert_eq!(summary.status, RunStatus::Fail);
        assert_eq!(summary.to_string(), "FAIL    /tmp/t.test    100.000s");
    }
}
