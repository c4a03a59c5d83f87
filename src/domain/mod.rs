//! Domain layer for devicedesk.
//!
//! Records the admin API returns, the payloads it accepts, and the crate-wide
//! error type. Nothing here performs I/O or knows about views.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: Client, operational and mixed user records
//! - [`application`]: Device/contract applications
//! - [`statistics`]: Server-computed aggregates and invoice metadata
//! - [`status`]: Validated status-update payloads
//! - [`session`]: Login, registration and persisted session records

pub mod application;
pub mod error;
pub mod session;
pub mod statistics;
pub mod status;
pub mod user;

pub use application::{Application, ApplicationStatus};
pub use error::{DeviceDeskError, Result};
pub use session::{AuthSession, LoginRequest, LoginResponse, RegisterOperationalRequest, SessionUser};
pub use statistics::{
    ApplicationStats, DashboardSummary, InvoiceInfo, MonthlyCount, StatisticsKind, StatisticsSnapshot,
};
pub use status::{ApplicationStatusUpdate, ClientStatusUpdate};
pub use user::{ClientUser, OperationalRole, OperationalUser, RegistrationStatus, UserSummary, UserType};

use serde::{Deserialize, Deserializer};

/// Accepts identifiers sent either as JSON strings or integers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
