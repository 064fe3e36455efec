//! Typed paths into the platform data directory.
//!
//! The platform mounts configuration, input tables, and the output location
//! under one root; all file access goes through this helper.
use crate::error::UserError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default data directory when neither `--data-dir` nor `KBC_DATADIR` is set.
pub const DEFAULT_DATA_DIR: &str = "/data";

#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `config.json` path.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Return the `in/tables/` directory path.
    pub fn input_tables_dir(&self) -> PathBuf {
        self.root.join("in").join("tables")
    }

    /// Return the `out/tables/` directory path.
    pub fn output_tables_dir(&self) -> PathBuf {
        self.root.join("out").join("tables")
    }

    /// List input CSV tables sorted by file name.
    ///
    /// Manifest sidecars and anything that is not a `.csv` file are skipped.
    pub fn input_tables(&self) -> Result<Vec<PathBuf>> {
        let dir = self.input_tables_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut tables = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("read {}", dir.display()))? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if path.is_file() && is_csv {
                tables.push(path);
            }
        }
        tables.sort();
        Ok(tables)
    }

    /// Return the table the connector reads identifiers from.
    pub fn first_input_table(&self) -> Result<PathBuf> {
        self.input_tables()?
            .into_iter()
            .next()
            .ok_or_else(|| UserError::MissingInputTable.into())
    }

    /// Load the `parameters` object from `config.json`.
    pub fn load_parameters(&self) -> Result<Value> {
        let path = self.config_path();
        let bytes = fs::read(&path).map_err(|err| {
            UserError::Configuration(format!("read config {}: {err}", path.display()))
        })?;
        let config: Value = serde_json::from_slice(&bytes).map_err(|err| {
            UserError::Configuration(format!("parse config {}: {err}", path.display()))
        })?;
        match config.get("parameters") {
            Some(parameters @ Value::Object(_)) => Ok(parameters.clone()),
            Some(_) => Err(UserError::Configuration(
                "config parameters must be a JSON object".to_string(),
            )
            .into()),
            None => Err(UserError::Configuration(
                "config.json has no parameters section".to_string(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(path, contents.as_bytes()).expect("write file");
    }

    #[test]
    fn lists_csv_tables_sorted_and_skips_manifests() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let data_dir = DataDir::new(temp.path().to_path_buf());
        let tables = data_dir.input_tables_dir();
        write_file(&tables.join("b.csv"), "ico\n");
        write_file(&tables.join("a.csv"), "ico\n");
        write_file(&tables.join("a.csv.manifest"), "{}");

        let listed = data_dir.input_tables().expect("list tables");
        assert_eq!(listed, vec![tables.join("a.csv"), tables.join("b.csv")]);
        assert_eq!(
            data_dir.first_input_table().expect("first table"),
            tables.join("a.csv")
        );
    }

    #[test]
    fn missing_input_directory_is_a_user_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let data_dir = DataDir::new(temp.path().to_path_buf());
        let err = data_dir.first_input_table().expect_err("no tables");
        assert!(matches!(
            err.downcast_ref::<UserError>(),
            Some(UserError::MissingInputTable)
        ));
    }

    #[test]
    fn loads_parameters_section() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let data_dir = DataDir::new(temp.path().to_path_buf());
        write_file(
            &data_dir.config_path(),
            r#"{"parameters": {"api_key": "k"}, "storage": {}}"#,
        );
        let parameters = data_dir.load_parameters().expect("load parameters");
        assert_eq!(parameters, json!({"api_key": "k"}));
    }

    #[test]
    fn unreadable_config_is_a_configuration_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let data_dir = DataDir::new(temp.path().to_path_buf());
        let err = data_dir.load_parameters().expect_err("missing config");
        assert!(matches!(
            err.downcast_ref::<UserError>(),
            Some(UserError::Configuration(_))
        ));

        write_file(&data_dir.config_path(), "{not json");
        let err = data_dir.load_parameters().expect_err("malformed config");
        assert!(err.to_string().starts_with("parse config"));
    }
}
