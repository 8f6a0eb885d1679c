//! Application configuration
//!
//! Settings come from three layers, later ones winning:
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. command line flags and environment variables (see `main.rs`)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Deployment environment, used to pick logging defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `tracing` filter used when neither `RUST_LOG` nor `log_filter` is set
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Development => "info,todo_lists=debug,tower_http=debug",
            Environment::Production => "info",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(format!(
                "Invalid environment '{}'. Valid options are: development, production",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite connection string
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Upper bound of the database connection pool
    pub max_connections: u32,
    pub environment: Environment,
    /// Explicit `tracing` filter; overrides the environment's default
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://todos.db?mode=rwc".to_string(),
            host: "127.0.0.1".to_string(),
            port: 5003,
            max_connections: 5,
            environment: Environment::Development,
            log_filter: None,
        }
    }
}

/// Values given on the command line or through environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub database_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub environment: Option<Environment>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing keys keep their default values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(database_url) = overrides.database_url {
            self.database_url = database_url;
        }
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(environment) = overrides.environment {
            self.environment = environment;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .unwrap_or_else(|| self.environment.default_log_filter())
    }
}
