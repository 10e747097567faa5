//! Server configuration loaded from environment variables.
//!
//! - `MEMO_API_HOST` / `MEMO_API_PORT`: listen address (default `127.0.0.1:3000`)
//! - `MEMO_API_DB`: database file (default: platform data dir, `memo.db`)
//! - `MEMO_API_KEY`: bearer token required on memo routes (optional)
//! - `MEMO_API_CORS_ORIGINS`: comma-separated CORS allow list (optional)
//!
//! Command-line flags for `serve` override these through [`ServerOverrides`].

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` means the platform default location.
    pub db_path: Option<PathBuf>,
    pub security: SecurityConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, so tests don't touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("MEMO_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("MEMO_API_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let db_path = lookup("MEMO_API_DB").map(PathBuf::from);

        Self {
            host,
            port,
            db_path,
            security: SecurityConfig::from_lookup(lookup),
        }
    }

    /// Apply command-line values on top of the environment. `None` keeps the
    /// current setting.
    pub fn with_overrides(mut self, overrides: ServerOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(db_path) = overrides.db_path {
            self.db_path = Some(db_path);
        }
        if let Some(api_key) = overrides.api_key.filter(|k| !k.is_empty()) {
            self.security.api_key = Some(api_key);
        }
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: None,
            security: SecurityConfig::disabled(),
        }
    }
}

/// Values given on the command line for `serve`.
#[derive(Clone, Debug, Default)]
pub struct ServerOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub api_key: Option<String>,
}

/// Authentication and CORS settings for the HTTP layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecurityConfig {
    pub api_key: Option<String>,
    pub cors_origins: Option<Vec<String>>,
}

impl SecurityConfig {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("MEMO_API_KEY").filter(|k| !k.is_empty());
        let cors_origins = lookup("MEMO_API_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        });

        Self {
            api_key,
            cors_origins,
        }
    }

    /// No authentication, permissive CORS. Used for local runs and tests.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            cors_origins: None,
        }
    }
}
