//! Output tables and their manifests.
//!
//! Each table is written to a hidden temporary sibling and renamed into place
//! once complete; the manifest follows only after the data file is published.
use crate::enrich::Row;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output table definition handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutTable {
    /// File name under `out/tables/`, e.g. `finstat_detail.csv`.
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: Vec<String>,
    /// Append to existing downstream data instead of replacing it.
    pub incremental: bool,
}

/// Sidecar metadata read by the platform loader.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    columns: &'a [String],
    incremental: bool,
    primary_key: &'a [String],
}

/// Paths written for one output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTable {
    pub data_path: PathBuf,
    pub manifest_path: PathBuf,
    pub rows: usize,
}

/// Write `rows` as CSV under `out_dir` and register the table with a manifest.
///
/// Cells are taken by column name; a row missing a column writes an empty cell.
pub fn write_table(out_dir: &Path, table: &OutTable, rows: &[Row]) -> Result<WrittenTable> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let data_path = out_dir.join(&table.name);
    let tmp_path = out_dir.join(format!(".{}.tmp", table.name));

    let written = write_csv(&tmp_path, &table.columns, rows).and_then(|()| {
        fs::rename(&tmp_path, &data_path)
            .with_context(|| format!("publish {}", data_path.display()))
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    let manifest_path = out_dir.join(format!("{}.manifest", table.name));
    write_manifest(&manifest_path, table)?;

    tracing::info!(
        table = %table.name,
        rows = rows.len(),
        incremental = table.incremental,
        "wrote output table"
    );
    Ok(WrittenTable {
        data_path,
        manifest_path,
        rows: rows.len(),
    })
}

fn write_csv(path: &Path, columns: &[String], rows: &[Row]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer
        .write_record(columns)
        .with_context(|| format!("write header to {}", path.display()))?;
    for row in rows {
        let cells = columns
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or_default());
        writer
            .write_record(cells)
            .with_context(|| format!("write row to {}", path.display()))?;
    }
    let mut inner = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .with_context(|| format!("flush {}", path.display()))?;
    inner
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

fn write_manifest(path: &Path, table: &OutTable) -> Result<()> {
    let manifest = Manifest {
        columns: &table.columns,
        incremental: table.incremental,
        primary_key: &table.primary_key,
    };
    let bytes = serde_json::to_vec_pretty(&manifest).context("serialize table manifest")?;
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
