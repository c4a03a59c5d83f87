//! Read-only aggregates computed by the server.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

use super::ClientUser;

/// Which statistics endpoint to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum StatisticsKind {
    #[default]
    Basic,
    Enhanced,
    Dashboard,
}

impl StatisticsKind {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Basic => "/admin/statistics",
            Self::Enhanced => "/admin/statistics/enhanced",
            Self::Dashboard => "/admin/statistics/dashboard",
        }
    }
}

/// Registrations counted per calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month label as sent by the API, e.g. `"2024-03"`.
    pub month: String,
    pub count: u64,
}

/// Aggregated counts by status, role and region.
///
/// Every field defaults to empty because the basic endpoint omits the
/// breakdowns the enhanced one includes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsSnapshot {
    pub total_users: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_role: BTreeMap<String, u64>,
    pub by_region: BTreeMap<String, u64>,
    pub monthly_trends: Vec<MonthlyCount>,
}

/// Headline numbers for the landing page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub total_client_users: u64,
    pub pending_verifications: u64,
    pub verified_users: u64,
    pub rejected_users: u64,
    pub suspended_users: u64,
    pub total_operational_users: u64,
    pub total_applications: u64,
    pub pending_applications: u64,
    pub recent_registrations: Vec<ClientUser>,
}

/// Application counts per status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub cancelled: u64,
}

/// Invoice metadata for a client user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceInfo {
    pub invoice_number: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub issued_at: Option<String>,
    pub available: bool,
}
