//! Subcommand implementations for the samvat CLI.

pub(crate) mod auth;
pub(crate) mod catalogs;
pub(crate) mod expiries;
pub(crate) mod run;

use anyhow::{Context, Result};
use samvat_lib::default_env_path;
use std::path::PathBuf;

/// Resolves the environment file path: the `--env` override, or the
/// platform config location.
pub(crate) fn env_path(overridden: Option<PathBuf>) -> Result<PathBuf> {
    match overridden {
        Some(path) => Ok(path),
        None => default_env_path().context("Failed to resolve the default environment path"),
    }
}
