//! devicedesk: admin console for judicial device and contract management.
//!
//! Staff use it to review client registrations, manage operational accounts,
//! process device/contract applications and read server-computed statistics,
//! all through the admin REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Driver (driver.rs)                                 │  ← Event loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← View state machines
//! │  - Per-view fetch / filter / paginate               │
//! │  - Status dialog and reload-after-write             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Auth          │
//! │ (ui/)         │   │ (worker/)     │   │ (auth/)       │
//! │ - Tables      │   │ - tokio tasks │   │ - Token ctx   │
//! │ - Banners     │   │ - Cancel/view │   │ - Session file│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  API (api/)  reqwest client + envelope decoding     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Infrastructure (infrastructure/) │
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: view state, events and actions
//! - [`driver`]: runs events, actions and worker responses to quiescence
//! - [`worker`]: background API execution with per-view cancellation
//! - [`api`]: the [`AdminApi`](api::AdminApi) boundary and its HTTP client
//! - [`auth`]: token context and persisted session
//! - [`domain`]: records, payloads and errors
//! - [`ui`]: text rendering
//! - [`infrastructure`]: config/session/trace paths
//! - `observability`: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! Sources in increasing priority: built-in defaults, `config.toml` in the
//! config directory, `DEVICEDESK_*` environment variables, CLI flags.
//!
//! ```toml
//! api_url = "https://devices.example.org/api"
//! timeout_secs = 20
//! page_size = 25
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use devicedesk::{handle_event, initialize, Config, Event};
//! use devicedesk::app::ViewKind;
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mount(ViewKind::ClientUsers))?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), devicedesk::DeviceDeskError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod auth;
pub mod domain;
pub mod driver;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{DeviceDeskError, Result};
pub use driver::Driver;

use crate::api::client::HttpClientConfig;
use crate::app::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ENV_PREFIX: &str = "DEVICEDESK_";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the admin API, including any path prefix such as `/api`.
    pub api_url: String,

    /// Per-request timeout. Default: 30
    pub timeout_secs: u64,

    /// Rows per page in list views. Default: 10
    pub page_size: usize,

    /// Filter directive for tracing (`trace`, `debug`, `info`, ...). `RUST_LOG`
    /// overrides it. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            trace_level: None,
        }
    }
}

/// On-disk shape of `config.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    page_size: Option<usize>,
    trace_level: Option<String>,
}

impl Config {
    /// Defaults, overlaid with `file` (if it exists) and then the
    /// `DEVICEDESK_*` environment.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Config`] if the file exists but is not valid
    /// TOML for this schema, or [`DeviceDeskError::Io`] if it cannot be read.
    pub fn load(file: &Path) -> Result<Self> {
        let mut config = Self::default();
        if file.exists() {
            let text = std::fs::read_to_string(file)?;
            config.apply_toml(&text)?;
            tracing::debug!(path = %file.display(), "config file applied");
        }
        config.apply_env(std::env::vars());
        Ok(config)
    }

    /// Overlays the keys present in a TOML document. A zero `timeout_secs` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Config`] for malformed TOML or unknown keys.
    pub fn apply_toml(&mut self, text: &str) -> Result<()> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| DeviceDeskError::Config(format!("invalid config file: {e}")))?;
        if let Some(api_url) = file.api_url {
            self.api_url = api_url;
        }
        if let Some(timeout_secs) = file.timeout_secs.filter(|n| *n > 0) {
            self.timeout_secs = timeout_secs;
        }
        if let Some(page_size) = file.page_size {
            self.page_size = page_size.max(1);
        }
        if file.trace_level.is_some() {
            self.trace_level = file.trace_level;
        }
        Ok(())
    }

    /// Overlays `DEVICEDESK_*` variables from `vars`.
    pub fn apply_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        let map: BTreeMap<String, String> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect();
        self.apply_map(&map);
    }

    /// Overlays string settings keyed by field name.
    ///
    /// # Parsing Rules
    ///
    /// - `api_url`, `trace_level`: taken as-is when non-blank
    /// - `timeout_secs`, `page_size`: ignored unless they parse as positive
    ///   integers
    pub fn apply_map(&mut self, map: &BTreeMap<String, String>) {
        let text = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(api_url) = text("api_url") {
            self.api_url = api_url.to_string();
        }
        if let Some(timeout_secs) = text("timeout_secs").and_then(|s| s.parse::<u64>().ok()).filter(|n| *n > 0) {
            self.timeout_secs = timeout_secs;
        }
        if let Some(page_size) = text("page_size").and_then(|s| s.parse::<usize>().ok()).filter(|n| *n > 0) {
            self.page_size = page_size;
        }
        if let Some(level) = text("trace_level") {
            self.trace_level = Some(level.to_string());
        }
    }

    #[must_use]
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            api_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Creates the view state for `config`.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, page_size = config.page_size, "initializing devicedesk");
    AppState::new(config.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_sources_override_earlier_ones() {
        let mut config = Config::default();
        config
            .apply_toml("api_url = \"https://file.example.org/api\"\npage_size = 25\n")
            .unwrap();
        config.apply_env(vec![
            ("DEVICEDESK_API_URL".to_string(), "https://env.example.org/api".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ]);

        assert_eq!(config.api_url, "https://env.example.org/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let mut config = Config::default();
        let map = BTreeMap::from([
            ("timeout_secs".to_string(), "soon".to_string()),
            ("page_size".to_string(), "0".to_string()),
        ]);
        config.apply_map(&map);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn zero_timeout_in_file_keeps_the_ceiling() {
        let mut config = Config::default();
        config.apply_toml("timeout_secs = 0\n").unwrap();

        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.http_config().timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn unknown_toml_key_is_a_config_error() {
        let err = Config::default().apply_toml("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, DeviceDeskError::Config(_)));
    }

    #[test]
    fn missing_file_gives_defaults_plus_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.page_size >= 1);
    }
}
