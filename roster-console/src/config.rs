//! Console configuration loaded from the environment

use std::path::PathBuf;

use roster_client::{ClientConfig, SourceKind};

/// Terminal client configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | ROSTER_DATA_DIR | ./roster-data | Local store and log directory |
/// | ROSTER_API_URL | http://localhost:4000/graphql | GraphQL endpoint |
/// | ROSTER_DEMO_URL | https://jsonplaceholder.typicode.com/users | Demo users endpoint |
/// | ROSTER_SOURCE | demo | Data source: demo \| graphql |
/// | ROSTER_PAGE_SIZE | 10 | Rows per listing page |
/// | ROSTER_TIMEOUT_SECS | 30 | HTTP request timeout (seconds) |
/// | ROSTER_LOG_DIR | (unset) | Daily-rolling log files, disabled when unset |
///
/// # Example
///
/// ```ignore
/// ROSTER_SOURCE=graphql ROSTER_API_URL=http://api.internal/graphql roster
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the embedded store
    pub data_dir: String,
    /// GraphQL endpoint
    pub api_url: String,
    /// Public users endpoint backing demo mode
    pub demo_url: String,
    /// Which backend serves the directory
    pub source: SourceKind,
    /// Rows per page in the employee listing
    pub page_size: usize,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ROSTER_DATA_DIR").unwrap_or_else(|_| "./roster-data".into()),
            api_url: std::env::var("ROSTER_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000/graphql".into()),
            demo_url: std::env::var("ROSTER_DEMO_URL")
                .unwrap_or_else(|_| "https://jsonplaceholder.typicode.com/users".into()),
            source: match std::env::var("ROSTER_SOURCE").as_deref() {
                Ok("graphql") => SourceKind::GraphQl,
                _ => SourceKind::Demo,
            },
            page_size: std::env::var("ROSTER_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|p| *p > 0)
                .unwrap_or(10),
            timeout_secs: std::env::var("ROSTER_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            log_dir: std::env::var("ROSTER_LOG_DIR").ok(),
        }
    }

    /// Path of the embedded key-value store file
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("roster.redb")
    }

    /// Client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url, &self.demo_url)
            .with_source(self.source)
            .with_timeout(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
