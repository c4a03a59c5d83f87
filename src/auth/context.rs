//! Process-wide bearer token shared by every outgoing request.

use std::sync::{Arc, RwLock};

/// Single-writer, many-reader handle on the session token.
///
/// Cloning the handle shares the token. The HTTP client reads it on every
/// request; only the login and logout flows write it.
///
/// # Examples
///
/// ```
/// use devicedesk::auth::AuthContext;
///
/// let auth = AuthContext::default();
/// let reader = auth.clone();
/// auth.set("abc".to_string());
/// assert_eq!(reader.get().as_deref(), Some("abc"));
/// auth.clear();
/// assert!(!reader.is_authenticated());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthContext {
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub fn set(&self, token: String) {
        tracing::debug!("session token set");
        match self.token.write() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    pub fn clear(&self) {
        tracing::debug!("session token cleared");
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
