//! Business-registry lookups.
//!
//! The runner only sees the [`RegistryLookup`] trait; [`FinstatClient`] is the
//! HTTP implementation used in production. Every call is a single blocking
//! request with no retries.
use crate::config::{Configuration, RequestType};
use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

pub const DEFAULT_BASE_URL: &str = "https://www.finstat.sk/api";

/// Upper bound for one registry request, connect through body.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bytes of an unexpected response body kept in error messages.
const MAX_BODY_EXCERPT: usize = 512;

/// Outcome of one identifier lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// Registry record flattened to field name -> string value.
    Found(BTreeMap<String, String>),
    NotFound,
}

/// Capability to resolve one identifier against the registry.
///
/// An `Err` means the call itself failed; callers decide whether that is fatal.
pub trait RegistryLookup {
    fn lookup(&self, ico: &str) -> Result<LookupResult>;
}

/// Finstat API client for the `detail` and `extended` endpoints.
pub struct FinstatClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    private_key: String,
    request_type: RequestType,
}

impl FinstatClient {
    pub fn new(config: &Configuration) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(config: &Configuration, base_url: &str) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            private_key: config.private_key.clone(),
            request_type: config.request_type,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}.json", self.base_url, self.request_type.as_str())
    }
}

impl RegistryLookup for FinstatClient {
    fn lookup(&self, ico: &str) -> Result<LookupResult> {
        let start = Instant::now();
        let hash = verification_hash(&self.api_key, &self.private_key, ico);
        let url = self.endpoint();
        let mut response = self
            .agent
            .post(url.as_str())
            .send_form([
                ("ico", ico),
                ("apiKey", self.api_key.as_str()),
                ("Hash", hash.as_str()),
            ])
            .with_context(|| format!("request {url} for ICO {ico}"))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("read response for ICO {ico}"))?;

        tracing::debug!(
            ico,
            status,
            elapsed_ms = start.elapsed().as_millis(),
            response_bytes = body.len(),
            "registry lookup complete"
        );

        parse_response(status, &body)
    }
}

/// Interpret a registry HTTP response.
pub fn parse_response(status: u16, body: &str) -> Result<LookupResult> {
    if status == 404 {
        return Ok(LookupResult::NotFound);
    }
    if !(200..300).contains(&status) {
        return Err(anyhow!(
            "registry returned status {status}: {}",
            excerpt(body.trim(), MAX_BODY_EXCERPT)
        ));
    }
    let value: Value = serde_json::from_str(body).with_context(|| {
        format!(
            "parse registry response: {}",
            excerpt(body.trim(), MAX_BODY_EXCERPT)
        )
    })?;
    match value {
        Value::Object(fields) if fields.is_empty() => Ok(LookupResult::NotFound),
        Value::Object(fields) => Ok(LookupResult::Found(flatten_fields(fields))),
        Value::Null => Ok(LookupResult::NotFound),
        other => Err(anyhow!(
            "registry response is not a JSON object: {}",
            excerpt(&other.to_string(), MAX_BODY_EXCERPT)
        )),
    }
}

fn flatten_fields(fields: Map<String, Value>) -> BTreeMap<String, String> {
    fields
        .into_iter()
        .map(|(name, value)| (name, cell_text(value)))
        .collect()
}

/// Render one JSON value as a CSV cell.
pub fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        // Numbers, booleans, and nested structures keep their JSON spelling.
        other => other.to_string(),
    }
}

/// Request signature expected by the registry: uppercase hex SHA-256 of the
/// salted key pair and identifier.
pub fn verification_hash(api_key: &str, private_key: &str, ico: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("SomeSalt+{api_key}+{private_key}++{ico}+ended").as_bytes());
    format!("{:X}", hasher.finalize())
}

fn excerpt(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
