//! One connector run, from platform configuration to output tables.
use crate::client::RegistryLookup;
use crate::config::{Configuration, LogSettings};
use crate::datadir::DataDir;
use crate::enrich::enrich_identifiers;
use crate::loader::load_identifiers;
use crate::output::{write_table, OutTable, WrittenTable};
use crate::schema::{self, KEY_ICO};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub identifiers: usize,
    pub enriched: WrittenTable,
    pub failed: WrittenTable,
}

/// Validate configuration, then enrich the first input table.
///
/// `connect` builds the registry client once the configuration is known. The
/// rest of the run logs through the subscriber `make_subscriber` builds from
/// the configured [`LogSettings`].
pub fn run<F, M, S>(data_dir: &DataDir, make_subscriber: M, connect: F) -> Result<RunSummary>
where
    F: FnOnce(&Configuration) -> Box<dyn RegistryLookup>,
    M: FnOnce(LogSettings) -> S,
    S: tracing::Subscriber + Send + Sync + 'static,
{
    let parameters = data_dir.load_parameters()?;
    let config = Configuration::from_parameters(&parameters)?;
    let subscriber = make_subscriber(config.log_settings());
    tracing::subscriber::with_default(subscriber, || execute(data_dir, &config, connect))
}

fn execute<F>(data_dir: &DataDir, config: &Configuration, connect: F) -> Result<RunSummary>
where
    F: FnOnce(&Configuration) -> Box<dyn RegistryLookup>,
{
    tracing::debug!(config = ?config, "Component will run in Debug mode");
    let fields = schema::fields_for(config.request_type);

    let input_table = data_dir.first_input_table()?;
    tracing::info!(
        data_dir = %data_dir.root().display(),
        input = %input_table.display(),
        request_type = %config.request_type,
        "reading identifiers"
    );
    let identifiers = load_identifiers(&input_table, &config.ico_field)?;

    let lookup = connect(config);
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let outcome = enrich_identifiers(&identifiers, fields, lookup.as_ref(), &timestamp);
    tracing::info!(
        identifiers = identifiers.len(),
        found = outcome.enriched.len(),
        failed = outcome.failed.len(),
        "enrichment complete"
    );

    let out_dir = data_dir.output_tables_dir();
    let enriched = write_table(
        &out_dir,
        &OutTable {
            name: format!("finstat_{}.csv", config.request_type),
            columns: schema::enriched_columns(fields),
            primary_key: vec![KEY_ICO.to_string()],
            incremental: true,
        },
        &outcome.enriched,
    )?;
    let failed = write_table(
        &out_dir,
        &OutTable {
            name: format!("finstat_{}_bad_icos.csv", config.request_type),
            columns: vec![KEY_ICO.to_string()],
            primary_key: vec![KEY_ICO.to_string()],
            incremental: false,
        },
        &outcome.failed,
    )?;

    Ok(RunSummary {
        identifiers: identifiers.len(),
        enriched,
        failed,
    })
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
