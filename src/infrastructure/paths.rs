//! Locations of the config file, session file and trace output.
//!
//! Everything lives under one per-user directory unless `DEVICEDESK_HOME`
//! points elsewhere:
//!
//! | file           | default                                   |
//! |----------------|-------------------------------------------|
//! | `config.toml`  | `<config dir>/devicedesk/config.toml`     |
//! | `session.json` | `<local data dir>/devicedesk/session.json`|
//! | traces         | `<local data dir>/devicedesk/`            |
//!
//! With `DEVICEDESK_HOME` set, all three live directly in that directory.

use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "DEVICEDESK_HOME";
const APP_DIR: &str = "devicedesk";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session.json";

fn home_override() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn resolve(home: Option<PathBuf>, platform_dir: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_else(|| {
        platform_dir
            .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")))
            .join(APP_DIR)
    })
}

/// Directory for the session file and trace output.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve(home_override(), dirs::data_local_dir())
}

#[must_use]
pub fn get_config_file() -> PathBuf {
    resolve(home_override(), dirs::config_dir()).join(CONFIG_FILE_NAME)
}

#[must_use]
pub fn get_session_file() -> PathBuf {
    get_data_dir().join(SESSION_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => Path::new(path).to_path_buf(),
    }
}
