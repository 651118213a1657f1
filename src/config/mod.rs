//! Run configuration
//!
//! Validates command-line arguments into a run configuration before any
//! work starts.

use std::path::PathBuf;
use thiserror::Error;

use crate::cli::Args;

/// Configuration errors, all fatal before any job is dispatched
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("test binary path must not be blank")]
    MissingBinary,

    #[error("not a valid file path: {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("parallelism must be at least 1")]
    ZeroParallelism,
}

/// Validated configuration for one run
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Path to the compiled test binary
    pub binary: PathBuf,

    /// Number of worker tasks, and therefore the cap on in-flight jobs
    pub parallelism: usize,
}

impl RunConfig {
    /// Build a run configuration from parsed arguments
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.binary.as_os_str().is_empty() {
            return Err(ConfigError::MissingBinary);
        }
        if !args.binary.exists() {
            return Err(ConfigError::BinaryNotFound(args.binary.clone()));
        }
        if args.parallelism == 0 {
            return Err(ConfigError::ZeroParallelism);
        }

        Ok(Self {
            binary: args.binary.clone(),
            parallelism: args.parallelism,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(argv)
    }

    #[test]
    fn test_blank_binary_rejected() {
        let args = args(&["partest", "-f", ""]);
        assert!(matches!(
            RunConfig::from_args(&args),
            Err(ConfigError::MissingBinary)
        ));
    }

    #[test]
    fn test_missing_binary_rejected() {
        let args = args(&["partest", "-f", "/no/such/binary"]);
        assert!(matches!(
            RunConfig::from_args(&args),
            Err(ConfigError::BinaryNotFound(_))
        ));
    }

    #[test]
    fn test_zero_parallelism_rejected() {
        let args = args(&["partest", "-f", "/bin/sh", "-p", "0"]);
        assert!(matches!(
            RunConfig::from_args(&args),
            Err(ConfigError::ZeroParallelism)
        ));
    }

    #[test]
    fn test_valid_config() {
        let args = args(&["partest", "-f", "/bin/sh", "-p", "8"]);
        let config = RunConfig::from_args(&args).unwrap();
        assert_eq!(config.binary, PathBuf::from("/bin/sh"));
        assert_eq!(config.parallelism, 8);
    }
}
