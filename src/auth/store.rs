//! Persistence of the operator session between CLI invocations.
//!
//! The session file is small, human-readable JSON written atomically
//! (write-to-temp + rename) so a crash never leaves a half-written token behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "session": {
//!     "token": "eyJhbGciOi...",
//!     "email": "ops@justice.gov.za",
//!     "role": "Admin",
//!     "signed_in_at": "2024-05-02T08:15:00Z"
//!   }
//! }
//! ```

use crate::domain::error::{DeviceDeskError, Result};
use crate::domain::AuthSession;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Abstraction over where the session lives.
///
/// The CLI uses [`JsonSessionStore`]; tests can substitute anything that keeps
/// a session in memory.
pub trait SessionStore: Send {
    /// Returns the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store exists but cannot be read.
    fn load(&self) -> Result<Option<AuthSession>>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save(&mut self, session: &AuthSession) -> Result<()>;

    /// Removes the stored session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing session cannot be removed.
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    session: Option<AuthSession>,
}

/// JSON file session store.
#[derive(Debug)]
pub struct JsonSessionStore {
    file_path: PathBuf,
}

impl JsonSessionStore {
    /// Creates a store backed by `file_path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_atomically(&self, data: &SessionFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| DeviceDeskError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing session to temporary file");
        std::fs::write(&tmp_path, json)?;
        restrict_permissions(&tmp_path)?;
        std::fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<AuthSession>> {
        let _span = tracing::debug_span!("session_load", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no session file");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let data: SessionFile = serde_json::from_str(&contents)
            .map_err(|e| DeviceDeskError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(version = data.version, found = data.session.is_some(), "session file loaded");
        Ok(data.session)
    }

    fn save(&mut self, session: &AuthSession) -> Result<()> {
        let _span = tracing::debug_span!("session_save", email = %session.email).entered();

        self.write_atomically(&SessionFile {
            version: 1,
            session: Some(session.clone()),
        })?;

        tracing::debug!("session saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("session_clear").entered();

        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoginResponse;

    fn session() -> AuthSession {
        AuthSession::from_login(
            "ops@justice.gov.za",
            LoginResponse {
                token: "tok-123".to_string(),
                user: None,
            },
        )
    }

    #[test]
    fn save_load_clear_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSessionStore::new(dir.path().join("nested").join("session.json")).unwrap();

        assert!(store.load().unwrap().is_none());

        store.save(&session()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.email, "ops@justice.gov.za");
        assert!(!store.path().with_extension("tmp").exists());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonSessionStore::new(path).unwrap();
        assert!(matches!(store.load(), Err(DeviceDeskError::Storage(_))));
    }
}
