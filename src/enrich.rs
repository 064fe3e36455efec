//! Per-identifier enrichment.
//!
//! Identifiers are looked up one at a time in input order. Each one ends up in
//! exactly one of the two output sequences.
use crate::client::{LookupResult, RegistryLookup};
use crate::schema::{KEY_ICO, KEY_TIMESTAMP};
use std::collections::BTreeMap;

/// One output row keyed by column name.
pub type Row = BTreeMap<String, String>;

/// Rows produced by one enrichment pass.
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    /// Schema projection of every found record, plus the run timestamp.
    pub enriched: Vec<Row>,
    /// `{Ico}` rows for identifiers the registry did not resolve.
    pub failed: Vec<Row>,
}

/// Look up every identifier and split the results into enriched and failed rows.
///
/// A lookup error is logged and treated the same as a missing record.
pub fn enrich_identifiers(
    identifiers: &[String],
    fields: &[&str],
    lookup: &dyn RegistryLookup,
    timestamp: &str,
) -> EnrichmentOutcome {
    let mut outcome = EnrichmentOutcome::default();
    for ico in identifiers {
        let result = match lookup.lookup(ico) {
            Ok(result) => result,
            Err(err) => {
                let error = format!("{err:#}");
                tracing::warn!(ico = %ico, error = %error, "registry lookup failed");
                LookupResult::NotFound
            }
        };
        match result {
            LookupResult::Found(record) => {
                outcome.enriched.push(project(&record, fields, timestamp));
            }
            LookupResult::NotFound => {
                tracing::debug!(ico = %ico, "no registry record");
                outcome.failed.push(failed_row(ico));
            }
        }
    }
    outcome
}

/// Keep exactly the schema fields of `record`, defaulting absent ones to "".
fn project(record: &BTreeMap<String, String>, fields: &[&str], timestamp: &str) -> Row {
    let mut row: Row = fields
        .iter()
        .map(|field| {
            let value = record.get(*field).cloned().unwrap_or_default();
            (field.to_string(), value)
        })
        .collect();
    row.insert(KEY_TIMESTAMP.to_string(), timestamp.to_string());
    row
}

fn failed_row(ico: &str) -> Row {
    Row::from([(KEY_ICO.to_string(), ico.to_string())])
}

#[cfg(test)]
#[path = "enrich_tests.rs"]
mod tests;
