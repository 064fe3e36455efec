//! Identifier extraction from the input table.
use crate::error::UserError;
use anyhow::{Context, Result};
use std::path::Path;

/// Registry quota per run; identifiers past this point are dropped.
pub const API_LIMIT: usize = 5000;

/// Read the `column` values of the CSV at `path`, in row order.
///
/// Rows shorter than the header read as an empty identifier. More than
/// [`API_LIMIT`] identifiers are truncated with a warning, never an error.
pub fn load_identifiers(path: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open input table {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .clone();
    let index = headers
        .iter()
        .position(|name| name == column)
        .ok_or_else(|| UserError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut identifiers = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("read row {} of {}", idx + 1, path.display()))?;
        identifiers.push(record.get(index).unwrap_or_default().to_string());
    }

    tracing::debug!(count = identifiers.len(), column, "loaded identifiers");
    Ok(truncate_to_limit(identifiers, API_LIMIT))
}

fn truncate_to_limit(mut identifiers: Vec<String>, limit: usize) -> Vec<String> {
    if identifiers.len() > limit {
        tracing::warn!(
            requested = identifiers.len(),
            limit,
            "More than {limit} ICOs requested, truncating to {limit}"
        );
        identifiers.truncate(limit);
    }
    identifiers
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
