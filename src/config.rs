//! Run configuration.
//!
//! Every knob has a default that reproduces the fixed smoke scripts, so an
//! empty environment needs no setup. Overrides come from an optional YAML file
//! (`CHAT_SMOKE_CONFIG`) and then from individual env vars:
//!
//! - `CHAT_SMOKE_ENDPOINT` (default `http://localhost:8080/v1/chat/completions`)
//! - `CHAT_SMOKE_MODEL` (default `sonnet`)
//! - `CHAT_SMOKE_TIMEOUT_SECS` (default: HTTP client default)
//! - `CHAT_SMOKE_PROXY_URL`

use crate::error::{Error, ErrorContext};
use crate::Result;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "sonnet";

pub const ENV_CONFIG_PATH: &str = "CHAT_SMOKE_CONFIG";
pub const ENV_ENDPOINT: &str = "CHAT_SMOKE_ENDPOINT";
pub const ENV_MODEL: &str = "CHAT_SMOKE_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "CHAT_SMOKE_TIMEOUT_SECS";
pub const ENV_PROXY_URL: &str = "CHAT_SMOKE_PROXY_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    pub endpoint: Url,
    pub model: String,
    /// `None` keeps the HTTP client's own default.
    pub timeout_secs: Option<u64>,
    pub proxy_url: Option<String>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
            proxy_url: None,
        }
    }
}

/// Shape of the optional YAML config file. All keys are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    proxy_url: Option<String>,
}

impl SmokeConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup(ENV_CONFIG_PATH)) {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::configuration_with_context(
                        "cannot read config file",
                        ErrorContext::new()
                            .with_field_path(ENV_CONFIG_PATH)
                            .with_details(format!("{}: {}", path, e))
                            .with_source("env"),
                    )
                })?;
                Self::from_yaml_str(&content)?
            }
            None => Self::default(),
        };

        if let Some(raw) = non_empty(lookup(ENV_ENDPOINT)) {
            config.endpoint = parse_endpoint(&raw, "env")?;
        }
        if let Some(model) = non_empty(lookup(ENV_MODEL)) {
            config.model = model;
        }
        if let Some(raw) = non_empty(lookup(ENV_TIMEOUT_SECS)) {
            config.timeout_secs = Some(parse_timeout(&raw)?);
        }
        if let Some(proxy) = non_empty(lookup(ENV_PROXY_URL)) {
            config.proxy_url = Some(proxy);
        }

        Ok(config)
    }

    /// Parse a YAML config document, filling missing keys with defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: FileConfig = if content.trim().is_empty() {
            FileConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let mut config = Self::default();
        if let Some(raw) = file.endpoint {
            config.endpoint = parse_endpoint(&raw, "config_file")?;
        }
        if let Some(model) = file.model {
            config.model = model;
        }
        config.timeout_secs = file.timeout_secs.or(config.timeout_secs);
        config.proxy_url = file.proxy_url.or(config.proxy_url);
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_endpoint(raw: &str, source: &str) -> Result<Url> {
    let invalid = |details: String| {
        Error::configuration_with_context(
            "invalid endpoint URL",
            ErrorContext::new()
                .with_field_path("endpoint")
                .with_details(details)
                .with_source(source),
        )
    };

    let url = Url::parse(raw).map_err(|e| invalid(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|e| {
        Error::configuration_with_context(
            "invalid timeout",
            ErrorContext::new()
                .with_field_path(ENV_TIMEOUT_SECS)
                .with_details(format!("{}: {}", raw, e))
                .with_source("env"),
        )
    })
}
