//! Test-name input
//!
//! Reads test-case names, one per line, from any buffered reader.

use anyhow::{Context, Result};
use std::io::BufRead;

/// Read test names from `reader`, one per line.
///
/// Names are trimmed of surrounding whitespace; blank lines are skipped.
/// A trailing newline on the final line is optional. Duplicates are kept:
/// each occurrence is dispatched independently. Any read error other than
/// end-of-input is fatal.
pub fn read_test_names<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for line in reader.lines() {
        let line = line.context("error reading stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            names.push(trimmed.to_string());
        }
    }

    Ok(names)
}
