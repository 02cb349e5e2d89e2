//! GitHub Actions environment interface.
//!
//! relkit runs as a step inside a GitHub Actions job. Inputs arrive as
//! `INPUT_<NAME>` environment variables and search-path additions are
//! published by appending lines to the file named by `GITHUB_PATH`.
//! This module is the only place that knows either convention.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable naming the path-additions file.
pub const GITHUB_PATH: &str = "GITHUB_PATH";

/// Read a step input by its action-level name.
///
/// Follows the Actions toolkit convention: the name is uppercased with
/// spaces replaced by underscores and prefixed with `INPUT_` (hyphens
/// are kept, so the input `builder-playground` is read from
/// `INPUT_BUILDER-PLAYGROUND`). Returns `None` when unset; the value
/// is returned trimmed.
#[must_use]
pub fn get_input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    std::env::var(key).ok().map(|value| value.trim().to_string())
}

/// Append a directory to the job's executable search path.
///
/// Appends one line to the file named by `GITHUB_PATH`; subsequent
/// steps in the same job see the directory on `PATH`. Fails with an
/// environment error when `GITHUB_PATH` is unset, and an I/O error
/// when the file cannot be written.
pub fn add_path(dir: &Path) -> Result<()> {
    let path_file = std::env::var(GITHUB_PATH)
        .map_err(|_| Error::environment("GITHUB_PATH is not set; not running under GitHub Actions?"))?;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path_file)
        .map_err(|e| Error::io(e, format!("opening {path_file}")))?;

    writeln!(file, "{}", dir.display()).map_err(|e| Error::io(e, format!("appending to {path_file}")))?;

    tracing::debug!(dir = %dir.display(), "Added directory to GITHUB_PATH");
    Ok(())
}
