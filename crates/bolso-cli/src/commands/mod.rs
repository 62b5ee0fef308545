//! Command implementations for the Bolso CLI

mod import;
mod insights;

pub use import::{cmd_categorize, cmd_import};
pub use insights::cmd_insights;

use anyhow::{Context, Result};
use std::path::Path;

/// Read a statement file and return its text plus the bare filename used
/// for format dispatch.
pub(crate) fn read_statement(path: &Path) -> Result<(String, String)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read statement file {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((content, filename))
}
