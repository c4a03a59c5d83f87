//! Device and contract applications.
//!
//! An application is a request by a client user for a device on a contract
//! plan. Its status lifecycle is independent of the applicant's registration
//! status: staff approve, reject (with a reason) or cancel it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::deserialize_id;

/// Lifecycle state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ApplicationStatus {
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "approved", alias = "APPROVED")]
    Approved,
    #[serde(alias = "rejected", alias = "REJECTED")]
    Rejected,
    #[serde(alias = "cancelled", alias = "CANCELLED")]
    Cancelled,
}

/// A device/contract application as listed by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(deserialize_with = "deserialize_id")]
    pub application_id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub applicant_id: String,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub applicant_email: Option<String>,
    #[serde(default)]
    pub device_model: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub contract_months: Option<u32>,
    #[serde(default)]
    pub region: Option<String>,
    pub application_status: ApplicationStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    /// Device and plan rendered as one column, e.g. `"Galaxy A15 / Data 5GB (24m)"`.
    #[must_use]
    pub fn device_summary(&self) -> String {
        let device = self.device_model.as_deref().unwrap_or("-");
        match (&self.plan_name, self.contract_months) {
            (Some(plan), Some(months)) => format!("{device} / {plan} ({months}m)"),
            (Some(plan), None) => format!("{device} / {plan}"),
            (None, _) => device.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_summary_degrades_gracefully() {
        let mut app: Application = serde_json::from_value(serde_json::json!({
            "application_id": 1,
            "applicant_id": "c-7",
            "application_status": "Pending",
            "device_model": "Galaxy A15",
            "plan_name": "Data 5GB",
            "contract_months": 24
        }))
        .unwrap();

        assert_eq!(app.device_summary(), "Galaxy A15 / Data 5GB (24m)");

        app.contract_months = None;
        assert_eq!(app.device_summary(), "Galaxy A15 / Data 5GB");

        app.plan_name = None;
        app.device_model = None;
        assert_eq!(app.device_summary(), "-");
    }
}
