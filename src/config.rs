use std::net::SocketAddr;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "docfill";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const ENV_API_KEY: &str = "DOCFILL_GATEWAY_API_KEY";
const ENV_GATEWAY_URL: &str = "DOCFILL_GATEWAY_URL";
const ENV_MODEL: &str = "DOCFILL_MODEL";
const ENV_TIMEOUT: &str = "DOCFILL_TIMEOUT_SECS";
const ENV_BIND_ADDR: &str = "DOCFILL_BIND_ADDR";
const ENV_EXTRACTOR_URL: &str = "DOCFILL_EXTRACTOR_URL";
const ENV_MAX_UPLOAD: &str = "DOCFILL_MAX_UPLOAD_BYTES";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "docfill=debug,docfill_lib=debug,tower_http=debug,info"
    } else {
        "docfill=info,docfill_lib=info,warn"
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Settings for the in-process vision gateway client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: String,
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub gateway_api_key: Option<String>,
    pub gateway_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub bind_addr: SocketAddr,
    /// When set, extraction is delegated to this `/extract-document` endpoint.
    pub extractor_url: Option<String>,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = match get(ENV_TIMEOUT) {
            Some(raw) => parse_positive(ENV_TIMEOUT, &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let max_upload_bytes = match get(ENV_MAX_UPLOAD) {
            Some(raw) => parse_positive(ENV_MAX_UPLOAD, &raw)? as usize,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let bind_raw = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e| ConfigError::Invalid {
            var: ENV_BIND_ADDR,
            reason: format!("{e}"),
        })?;

        let extractor_url = get(ENV_EXTRACTOR_URL);
        if let Some(url) = &extractor_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: ENV_EXTRACTOR_URL,
                    reason: "must be an http(s) URL".into(),
                });
            }
        }

        Ok(Self {
            gateway_api_key: get(ENV_API_KEY),
            gateway_url: get(ENV_GATEWAY_URL).unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs,
            bind_addr,
            extractor_url,
            max_upload_bytes,
        })
    }

    /// Gateway settings. Fails when no API key is configured.
    pub fn gateway(&self) -> Result<GatewayConfig, ConfigError> {
        let api_key = self
            .gateway_api_key
            .clone()
            .ok_or(ConfigError::Missing(ENV_API_KEY))?;
        Ok(GatewayConfig {
            api_key,
            url: self.gateway_url.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".into(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
