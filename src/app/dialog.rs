//! Status-change dialog state.
//!
//! A dialog targets one row of a view. Submitting validates the chosen status
//! and reason locally; only a valid payload becomes a worker request. A failed
//! write keeps the dialog open with the server's message so the user can retry.

use crate::app::modes::ViewKind;
use crate::domain::error::{DeviceDeskError, Result};
use crate::domain::{ApplicationStatus, ApplicationStatusUpdate, ClientStatusUpdate, RegistrationStatus};
use crate::worker::ApiRequest;

/// Target status picked in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChoice {
    Registration(RegistrationStatus),
    Application(ApplicationStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDialog {
    pub view: ViewKind,
    pub target_id: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl StatusDialog {
    #[must_use]
    pub fn new(view: ViewKind, target_id: String) -> Self {
        Self {
            view,
            target_id,
            error: None,
            submitting: false,
        }
    }

    /// Validates the choice and builds the write request.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Validation`] when the choice does not belong
    /// to this dialog's view or a rejection has no reason.
    pub fn build_request(&self, choice: StatusChoice, reason: Option<&str>) -> Result<ApiRequest> {
        let id = self.target_id.clone();
        match (self.view, choice) {
            (ViewKind::ClientUsers, StatusChoice::Registration(status)) => Ok(
                ApiRequest::update_client_status(self.view, id, ClientStatusUpdate::new(status, reason)?),
            ),
            (ViewKind::Applications, StatusChoice::Application(status)) => Ok(
                ApiRequest::update_application_status(self.view, id, ApplicationStatusUpdate::new(status, reason)?),
            ),
            (view, choice) => Err(DeviceDeskError::Validation(format!(
                "{choice:?} is not a valid status for {view}"
            ))),
        }
    }

    #[must_use]
    pub fn targets(&self, view: ViewKind, id: &str) -> bool {
        self.view == view && self.target_id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_without_reason_builds_nothing() {
        let dialog = StatusDialog::new(ViewKind::ClientUsers, "7".to_string());
        let err = dialog
            .build_request(StatusChoice::Registration(RegistrationStatus::Rejected), Some("   "))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn application_choice_on_client_dialog_is_invalid() {
        let dialog = StatusDialog::new(ViewKind::ClientUsers, "7".to_string());
        let err = dialog
            .build_request(StatusChoice::Application(ApplicationStatus::Approved), None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn valid_choice_builds_write_for_target() {
        let dialog = StatusDialog::new(ViewKind::Applications, "APP-9".to_string());
        let request = dialog
            .build_request(StatusChoice::Application(ApplicationStatus::Approved), None)
            .unwrap();
        match request {
            ApiRequest::UpdateApplicationStatus { id, update, .. } => {
                assert_eq!(id, "APP-9");
                assert_eq!(update.status, ApplicationStatus::Approved);
                assert_eq!(update.rejection_reason, None);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }
}
