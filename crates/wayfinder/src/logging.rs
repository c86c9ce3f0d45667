//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing::Level;

/// Installs a `fmt` subscriber filtered at `level`
///
/// Returns `Ok(false)` if a global subscriber was already installed, so it
/// is safe to call more than once (tests, embedding applications).
///
/// # Errors
///
/// Fails when `level` is not a tracing level name.
pub fn init(level: &str) -> Result<bool> {
    let level: Level = level
        .trim()
        .parse()
        .with_context(|| format!("Invalid log level: {:?}", level))?;

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(%level, "logging initialized");
    }
    Ok(installed)
}
