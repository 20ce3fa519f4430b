//! Service configuration read from the environment

use crate::error::{IsoVisError, IsoVisResult};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8086;

/// Settings for the HTTP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Read `ISOVIS_HOST`, `ISOVIS_PORT` and `ISOVIS_CORS_ORIGINS`
    pub fn from_env() -> IsoVisResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> IsoVisResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("ISOVIS_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("ISOVIS_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                IsoVisError::InvalidInput(format!("ISOVIS_PORT is not a valid port: '{}'", raw))
            })?,
            None => defaults.port,
        };

        let cors_origins = lookup("ISOVIS_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            cors_origins,
        })
    }

    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
