//! Host configuration parsed from environment variables.
//!
//! `.env` is loaded by `main` before this runs, so values there behave like
//! real environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid { var: &'static str, value: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub port: u16,
    /// Base URL of the REST backend, without a trailing slash.
    pub backend_url: String,
    pub proxy_timeout: Duration,
}

impl PortalConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PORTAL_BACKEND_URL`: default `http://localhost:5000/api`
    /// - `PORTAL_PROXY_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PortalConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw, reason: "expected a port number" })?,
        };

        let backend_url = var("PORTAL_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "PORTAL_BACKEND_URL",
                value: backend_url,
                reason: "expected an http(s) URL",
            });
        }
        let backend_url = backend_url.trim_end_matches('/').to_owned();

        let timeout_secs = match var("PORTAL_PROXY_TIMEOUT_SECS") {
            None => DEFAULT_PROXY_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "PORTAL_PROXY_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds",
                    });
                }
            },
        };

        Ok(Self { port, backend_url, proxy_timeout: Duration::from_secs(timeout_secs) })
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
