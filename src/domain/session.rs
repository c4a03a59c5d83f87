//! Authentication payloads and the persisted operator session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{DeviceDeskError, Result};
use super::OperationalRole;

const MIN_PASSWORD_LEN: usize = 8;

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Identity block returned next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// The signed-in operator, as stored in the session file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

impl AuthSession {
    /// Builds the session from a login response, falling back to the email
    /// that was used to sign in when the API omits the identity block.
    #[must_use]
    pub fn from_login(email: &str, response: LoginResponse) -> Self {
        let (email, role) = match response.user {
            Some(user) => (user.email, user.role),
            None => (email.to_string(), None),
        };
        Self {
            token: response.token,
            email,
            role,
            signed_in_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("signed_in_at", &self.signed_in_at)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/register-operational`.
#[derive(Clone, Serialize)]
pub struct RegisterOperationalRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: OperationalRole,
    pub password: String,
}

impl RegisterOperationalRequest {
    /// Checks the form before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Validation`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(DeviceDeskError::Validation("First and last name are required.".to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(DeviceDeskError::Validation(format!(
                "'{}' is not a valid email address.",
                self.email
            )));
        }
        if self.role == OperationalRole::Other {
            return Err(DeviceDeskError::Validation("Choose a known role.".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DeviceDeskError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for RegisterOperationalRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterOperationalRequest")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Shape check only: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(email: &str) -> RegisterOperationalRequest {
        RegisterOperationalRequest {
            first_name: "Lindiwe".to_string(),
            last_name: "Nkosi".to_string(),
            email: email.to_string(),
            phone: None,
            role: OperationalRole::Support,
            password: "correct-horse".to_string(),
        }
    }

    #[rstest]
    #[case("ops@justice.gov.za", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign.org", false)]
    #[case("@example.org", false)]
    #[case("two@@example.org", false)]
    #[case("dot@example.", false)]
    #[case("space in@example.org", false)]
    fn email_shape(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid);
    }

    #[test]
    fn registration_rejects_bad_email_and_short_password() {
        assert!(request("ops@justice.gov.za").validate().is_ok());
        assert!(request("not-an-email").validate().unwrap_err().is_validation());

        let mut short = request("ops@justice.gov.za");
        short.password = "short".to_string();
        assert!(short.validate().is_err());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let session = AuthSession::from_login(
            "ops@justice.gov.za",
            LoginResponse {
                token: "secret-token".to_string(),
                user: None,
            },
        );
        assert_eq!(session.email, "ops@justice.gov.za");
        assert!(!format!("{session:?}").contains("secret-token"));
        assert!(!format!("{:?}", request("a@b.co")).contains("correct-horse"));
    }
}
