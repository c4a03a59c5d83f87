//! User records returned by the admin API.
//!
//! The API exposes two user populations: client users (external registrants
//! such as advocates and magistrates whose registration is verified by staff)
//! and operational users (internal staff accounts with a role). The all-users
//! endpoint mixes both into [`UserSummary`] rows discriminated by [`UserType`].
//!
//! These records are owned by the server. The client only caches them in view
//! state and never edits them locally; the only mutation is the status-update
//! call in [`crate::domain::ClientStatusUpdate`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::deserialize_id;

/// Verification state of a client user's registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum RegistrationStatus {
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "verified", alias = "VERIFIED")]
    Verified,
    #[serde(alias = "rejected", alias = "REJECTED")]
    Rejected,
    #[serde(alias = "suspended", alias = "SUSPENDED")]
    Suspended,
}

impl RegistrationStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Verified, Self::Rejected, Self::Suspended];
}

/// Discriminates client registrants from internal staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum UserType {
    #[default]
    #[serde(alias = "client", alias = "CLIENT")]
    Client,
    #[serde(alias = "operational", alias = "OPERATIONAL")]
    Operational,
}

/// Role of an operational (staff) account.
///
/// Roles the client does not know about deserialize to [`OperationalRole::Other`]
/// instead of failing the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum OperationalRole {
    #[serde(alias = "admin", alias = "ADMIN")]
    Admin,
    #[serde(alias = "manager", alias = "MANAGER")]
    Manager,
    #[serde(alias = "support", alias = "SUPPORT")]
    Support,
    #[serde(alias = "technician", alias = "TECHNICIAN")]
    Technician,
    #[serde(other)]
    Other,
}

/// An external registrant whose registration is tracked by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub persal_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub registration_status: RegistrationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ClientUser {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

/// An internal staff account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: OperationalRole,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub registration_status: Option<RegistrationStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl OperationalUser {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

/// One row of the mixed all-users and search listings.
///
/// Type-specific fields are optional because which ones are present depends on
/// [`UserSummary::user_type`]. Older API versions send the discriminator as
/// `user_category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "user_category")]
    pub user_type: UserType,
    #[serde(default)]
    pub registration_status: Option<RegistrationStatus>,
    #[serde(default)]
    pub role: Option<OperationalRole>,
    #[serde(default)]
    pub persal_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserSummary {
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

fn join_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_user_accepts_numeric_ids_and_missing_optionals() {
        let json = r#"{
            "id": 42,
            "first_name": "Thandi",
            "last_name": "Mokoena",
            "email": "thandi@example.org",
            "registration_status": "pending"
        }"#;

        let user: ClientUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.registration_status, RegistrationStatus::Pending);
        assert!(user.persal_id.is_none());
        assert_eq!(user.full_name(), "Thandi Mokoena");
    }

    #[test]
    fn unknown_roles_do_not_fail_the_record() {
        let json = r#"{
            "id": "op-1",
            "first_name": "Sipho",
            "last_name": "Dlamini",
            "email": "sipho@example.org",
            "role": "Auditor"
        }"#;

        let user: OperationalUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, OperationalRole::Other);
    }

    #[test]
    fn summary_reads_legacy_user_category() {
        let json = r#"{
            "id": "9",
            "first_name": "Abel",
            "last_name": "",
            "email": "abel@example.org",
            "user_category": "operational"
        }"#;

        let user: UserSummary = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_type, UserType::Operational);
        assert_eq!(user.full_name(), "Abel");
    }

    #[test]
    fn statuses_parse_case_insensitively() {
        assert_eq!("rejected".parse::<RegistrationStatus>().unwrap(), RegistrationStatus::Rejected);
        assert_eq!("VERIFIED".parse::<RegistrationStatus>().unwrap(), RegistrationStatus::Verified);
        assert_eq!(RegistrationStatus::Suspended.to_string(), "Suspended");
    }
}
