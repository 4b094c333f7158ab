//! Server configuration for the SignalPath site.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Which lead store to use.
    pub store: StoreBackendType,
    /// Site-wide settings rendered into pages and messages.
    pub site: SiteSettings,
}

/// Supported lead store backends.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackendType {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// Hosted tables over PostgREST.
    Rest {
        url: String,
        api_key: String,
        timeout: Option<Duration>,
    },
}

impl std::fmt::Debug for StoreBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Rest { url, timeout, .. } => f
                .debug_struct("Rest")
                .field("url", url)
                .field("timeout", timeout)
                .finish_non_exhaustive(),
        }
    }
}

/// Values that show up in rendered pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    /// Base URL of the product app that owns login and signup.
    pub app_url: String,
    /// Contact address named in pilot application failures.
    pub pilot_email: String,
    /// General support address shown in the footer and legal pages.
    pub support_email: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            app_url: "https://app.signalpath.io".to_owned(),
            pilot_email: "pilots@signalpath.io".to_owned(),
            support_email: "support@signalpath.io".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `SIGNALPATH_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `SIGNALPATH_LOG_LEVEL`: log filter (default: `info`)
    /// - `SUPABASE_URL`, `SUPABASE_ANON_KEY`: hosted store; both must be set, otherwise in-memory
    /// - `SIGNALPATH_STORE_TIMEOUT_SECS`: per-request store timeout (default: none)
    /// - `SIGNALPATH_APP_URL`: product app base URL for login/signup
    /// - `SIGNALPATH_PILOT_EMAIL`: pilot program contact address
    /// - `SIGNALPATH_SUPPORT_EMAIL`: support contact address
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: SIGNALPATH_BIND_ADDR > PORT > default 127.0.0.1:8080
        let bind_addr = if let Ok(addr) = std::env::var("SIGNALPATH_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        };

        let log_level = std::env::var("SIGNALPATH_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let timeout = std::env::var("SIGNALPATH_STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let store = match (
            non_empty_var("SUPABASE_URL"),
            non_empty_var("SUPABASE_ANON_KEY"),
        ) {
            (Some(url), Some(api_key)) => StoreBackendType::Rest {
                url,
                api_key,
                timeout,
            },
            _ => StoreBackendType::Memory,
        };

        let defaults = SiteSettings::default();
        let site = SiteSettings {
            app_url: non_empty_var("SIGNALPATH_APP_URL")
                .map_or(defaults.app_url, |url| url.trim_end_matches('/').to_owned()),
            pilot_email: non_empty_var("SIGNALPATH_PILOT_EMAIL").unwrap_or(defaults.pilot_email),
            support_email: non_empty_var("SIGNALPATH_SUPPORT_EMAIL")
                .unwrap_or(defaults.support_email),
        };

        Self {
            bind_addr,
            log_level,
            store,
            site,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
