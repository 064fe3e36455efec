//! Connector parameters.
//!
//! Parameters arrive as the free-form `parameters` object of the platform
//! `config.json`. Validation is explicit and reports every bad field at once so
//! a user can fix the configuration in a single pass.
use crate::error::UserError;
use serde_json::{Map, Value};
use std::fmt;
use tracing::Level;

/// Registry endpoint family; selects both the API call and the output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Detail,
    Extended,
}

impl RequestType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "detail" => Some(RequestType::Detail),
            "extended" => Some(RequestType::Extended),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Detail => "detail",
            RequestType::Extended => "extended",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated connector configuration.
#[derive(Clone)]
pub struct Configuration {
    pub api_key: String,
    pub private_key: String,
    pub request_type: RequestType,
    /// Name of the input column holding the ICO numbers.
    pub ico_field: String,
    pub debug: bool,
}

// Keep the secret out of logs.
impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &self.api_key)
            .field("private_key", &"<redacted>")
            .field("request_type", &self.request_type)
            .field("ico_field", &self.ico_field)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Secret parameters are prefixed with `#` so the platform encrypts them.
const PRIVATE_KEY_SECRET: &str = "#private_key";
const PRIVATE_KEY_PLAIN: &str = "private_key";

impl Configuration {
    /// Validate the raw `parameters` object.
    pub fn from_parameters(parameters: &Value) -> Result<Self, UserError> {
        let Some(params) = parameters.as_object() else {
            return Err(validation_error(&["parameters: must be an object".to_string()]));
        };
        let mut errors = Vec::new();

        let api_key = required_string(params, "api_key", &mut errors);
        let private_key = if params.contains_key(PRIVATE_KEY_SECRET) {
            required_string(params, PRIVATE_KEY_SECRET, &mut errors)
        } else if params.contains_key(PRIVATE_KEY_PLAIN) {
            required_string(params, PRIVATE_KEY_PLAIN, &mut errors)
        } else {
            errors.push(format!("{PRIVATE_KEY_SECRET}: field required"));
            None
        };
        let request_type =
            required_string(params, "request_type", &mut errors).and_then(|raw| {
                let parsed = RequestType::parse(&raw);
                if parsed.is_none() {
                    errors.push(format!(
                        "request_type: unsupported value {raw:?} (expected \"detail\" or \"extended\")"
                    ));
                }
                parsed
            });
        let ico_field = required_string(params, "ico_field", &mut errors);
        let debug = match params.get("debug") {
            None | Some(Value::Null) => false,
            Some(raw) => parse_flag(raw).unwrap_or_else(|| {
                errors.push("debug: must be a boolean".to_string());
                false
            }),
        };

        match (api_key, private_key, request_type, ico_field) {
            (Some(api_key), Some(private_key), Some(request_type), Some(ico_field))
                if errors.is_empty() =>
            {
                Ok(Configuration {
                    api_key,
                    private_key,
                    request_type,
                    ico_field,
                    debug,
                })
            }
            _ => Err(validation_error(&errors)),
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings { debug: self.debug }
    }
}

/// Logging verbosity requested by the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub debug: bool,
}

impl LogSettings {
    pub fn level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

fn required_string(
    params: &Map<String, Value>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match params.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("{key}: field required"));
            None
        }
        Some(Value::String(value)) if value.trim().is_empty() => {
            errors.push(format!("{key}: must not be empty"));
            None
        }
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.push(format!("{key}: must be a string"));
            None
        }
    }
}

/// Boolean parameter that may arrive as a string or 0/1 from the platform UI.
fn parse_flag(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn validation_error(errors: &[String]) -> UserError {
    UserError::Configuration(format!("Validation Error: {}", errors.join(", ")))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
