//! Error types for devicedesk.
//!
//! This module defines the centralized error type [`DeviceDeskError`] and a type
//! alias [`Result`] used throughout the crate. Every failure a view can see falls
//! into one of three families: transport failures, failures reported by the admin
//! API, and client-side validation failures. All of them end up as a single
//! human-readable string in a banner or dialog via [`DeviceDeskError::user_message`].

use thiserror::Error;

/// The main error type for devicedesk operations.
///
/// Variants wrapping errors from external crates use `#[from]` so `?` converts
/// them automatically at the API and storage boundaries.
///
/// # Examples
///
/// ```
/// use devicedesk::domain::DeviceDeskError;
///
/// fn require_reason(reason: &str) -> Result<(), DeviceDeskError> {
///     if reason.trim().is_empty() {
///         return Err(DeviceDeskError::Validation("a reason is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(require_reason("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum DeviceDeskError {
    /// The request never produced a usable HTTP response.
    ///
    /// Covers connection refusals, DNS failures, TLS errors and timeouts.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The admin API answered with a non-2xx status or `success: false`.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Message reported by the API, or a generic fallback.
        message: String,
    },

    /// Input was rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session token is available for an authenticated call.
    #[error("Not signed in")]
    Unauthenticated,

    /// Reading or writing the local session file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeviceDeskError {
    /// Renders the error as the text shown in a banner or dialog alert.
    ///
    /// Server and validation messages are shown verbatim since they are written
    /// for operators; everything else gets a short prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } | Self::Validation(message) => message.clone(),
            Self::Unauthenticated => "You are not signed in. Run `devicedesk login` first.".to_string(),
            Self::Transport(e) if e.is_timeout() => "The admin API did not respond in time.".to_string(),
            Self::Transport(e) => format!("Could not reach the admin API: {e}"),
            other => other.to_string(),
        }
    }

    /// Whether this error came from input validation rather than the network.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A specialized `Result` type for devicedesk operations.
pub type Result<T> = std::result::Result<T, DeviceDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_are_shown_verbatim() {
        let err = DeviceDeskError::Server {
            status: 422,
            message: "Persal ID already registered".to_string(),
        };
        assert_eq!(err.user_message(), "Persal ID already registered");
        assert_eq!(err.to_string(), "Server error (422): Persal ID already registered");
    }

    #[test]
    fn validation_is_flagged() {
        let err = DeviceDeskError::Validation("bad email".to_string());
        assert!(err.is_validation());
        assert!(!DeviceDeskError::Unauthenticated.is_validation());
    }
}
