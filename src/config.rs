//! Environment-driven configuration.

use std::time::Duration;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Absent key means the model stage is skipped and every request is
    /// served by the deterministic resolver.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Overridable so tests can point the client at a local stub.
    pub gemini_base_url: String,
    pub model_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            port: port_from_env_value(std::env::var("PORT").ok()),
            gemini_api_key: non_empty(std::env::var("GEMINI_API_KEY").ok()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.into()),
            model_timeout: Duration::from_secs(timeout_from_env_value(
                std::env::var("MODEL_TIMEOUT_SECS").ok(),
            )),
        }
    }

    /// Address string the listener binds to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Parse the listen port, falling back to the default on absent or
/// unparseable values.
pub fn port_from_env_value(value: Option<String>) -> u16 {
    match value.as_deref().map(str::parse::<u16>) {
        Some(Ok(port)) => port,
        Some(Err(_)) => {
            tracing::warn!("PORT is not a valid port number, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }
        None => DEFAULT_PORT,
    }
}

/// Parse the model call timeout in seconds, falling back to the default.
pub fn timeout_from_env_value(value: Option<String>) -> u64 {
    match value.as_deref().map(str::parse::<u64>) {
        Some(Ok(secs)) if secs > 0 => secs,
        Some(_) => {
            tracing::warn!(
                "MODEL_TIMEOUT_SECS is not a positive integer, using {DEFAULT_MODEL_TIMEOUT_SECS}"
            );
            DEFAULT_MODEL_TIMEOUT_SECS
        }
        None => DEFAULT_MODEL_TIMEOUT_SECS,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "medsum=info,tower_http=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_absent_or_invalid() {
        assert_eq!(port_from_env_value(None), DEFAULT_PORT);
        assert_eq!(port_from_env_value(Some("not-a-port".into())), DEFAULT_PORT);
        assert_eq!(port_from_env_value(Some("8080".into())), 8080);
    }

    #[test]
    fn timeout_defaults_when_absent_invalid_or_zero() {
        assert_eq!(timeout_from_env_value(None), DEFAULT_MODEL_TIMEOUT_SECS);
        assert_eq!(timeout_from_env_value(Some("0".into())), DEFAULT_MODEL_TIMEOUT_SECS);
        assert_eq!(timeout_from_env_value(Some("oops".into())), DEFAULT_MODEL_TIMEOUT_SECS);
        assert_eq!(timeout_from_env_value(Some("90".into())), 90);
    }

    #[test]
    fn blank_api_key_counts_as_absent() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("key".into())), Some("key".into()));
    }

    #[test]
    fn socket_addr_joins_host_and_port() {
        let config = Config {
            bind_addr: "127.0.0.1".into(),
            port: 9999,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.into(),
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:9999");
    }
}
