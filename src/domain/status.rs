//! Validated status-update payloads.
//!
//! Both mutable resources share one rule: moving to `Rejected` needs a
//! non-blank reason. The constructors enforce it so a payload that reaches the
//! API layer is always valid, and a rejected submission never costs a request.

use serde::Serialize;

use super::error::{DeviceDeskError, Result};
use super::{ApplicationStatus, RegistrationStatus};

const REJECTION_REASON_REQUIRED: &str = "A reason is required when rejecting.";

/// Body of `PATCH /admin/client-users/:id/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientStatusUpdate {
    pub status: RegistrationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClientStatusUpdate {
    /// Builds a validated update.
    ///
    /// Blank notes are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Validation`] when `status` is
    /// [`RegistrationStatus::Rejected`] and `notes` is missing or blank.
    pub fn new(status: RegistrationStatus, notes: Option<&str>) -> Result<Self> {
        let notes = normalize(notes);
        if status == RegistrationStatus::Rejected && notes.is_none() {
            return Err(DeviceDeskError::Validation(REJECTION_REASON_REQUIRED.to_string()));
        }
        Ok(Self { status, notes })
    }
}

/// Body of `PUT /applications/admin/applications/:id/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationStatusUpdate {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl ApplicationStatusUpdate {
    /// Builds a validated update.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Validation`] when `status` is
    /// [`ApplicationStatus::Rejected`] and no reason is given.
    pub fn new(status: ApplicationStatus, reason: Option<&str>) -> Result<Self> {
        let rejection_reason = normalize(reason);
        if status == ApplicationStatus::Rejected && rejection_reason.is_none() {
            return Err(DeviceDeskError::Validation(REJECTION_REASON_REQUIRED.to_string()));
        }
        Ok(Self {
            status,
            rejection_reason,
        })
    }
}

fn normalize(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn rejecting_without_reason_is_invalid(#[case] notes: Option<&str>) {
        let err = ClientStatusUpdate::new(RegistrationStatus::Rejected, notes).unwrap_err();
        assert!(err.is_validation());

        let err = ApplicationStatusUpdate::new(ApplicationStatus::Rejected, notes).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn rejection_body_matches_wire_shape() {
        let update =
            ClientStatusUpdate::new(RegistrationStatus::Rejected, Some("missing documents")).unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"status": "Rejected", "notes": "missing documents"})
        );
    }

    #[test]
    fn other_statuses_do_not_need_notes() {
        let update = ClientStatusUpdate::new(RegistrationStatus::Verified, Some("  ")).unwrap();
        assert_eq!(update.notes, None);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"status": "Verified"})
        );

        let update = ApplicationStatusUpdate::new(ApplicationStatus::Approved, None).unwrap();
        assert_eq!(update.rejection_reason, None);
    }
}
