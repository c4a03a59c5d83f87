//! View model types representing renderable view state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) via
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings only, no business logic.

use crate::domain::{Application, ClientUser, OperationalUser, UserSummary};

/// Complete renderable state of one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub columns: Vec<&'static str>,
    /// Rows of the visible page only.
    pub rows: Vec<DisplayRow>,
    pub footer: FooterInfo,
    /// Error banner; shown above the table, rows stay visible underneath.
    pub banner: Option<String>,
    pub empty_state: Option<EmptyState>,
    pub dialog: Option<DialogInfo>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Human-readable summary of the active filters, if any.
    pub filters: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// One-based page number for display.
    pub page_number: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub loaded_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogInfo {
    pub target_id: String,
    pub error: Option<String>,
    pub submitting: bool,
}

/// Row layout of an entity in a table.
pub trait Tabular {
    fn columns() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn date(value: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

impl Tabular for ClientUser {
    fn columns() -> Vec<&'static str> {
        vec!["ID", "Name", "Email", "Persal", "Region", "Status", "Registered"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            or_dash(self.persal_id.as_deref()),
            or_dash(self.region.as_deref()),
            self.registration_status.to_string(),
            date(self.created_at.as_ref()),
        ]
    }
}

impl Tabular for OperationalUser {
    fn columns() -> Vec<&'static str> {
        vec!["ID", "Name", "Email", "Role", "Region", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            self.role.to_string(),
            or_dash(self.region.as_deref()),
            self.registration_status
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
        ]
    }
}

impl Tabular for UserSummary {
    fn columns() -> Vec<&'static str> {
        vec!["ID", "Name", "Email", "Type", "Region", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            self.user_type.to_string(),
            or_dash(self.region.as_deref()),
            self.registration_status
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
        ]
    }
}

impl Tabular for Application {
    fn columns() -> Vec<&'static str> {
        vec!["ID", "Applicant", "Device", "Region", "Status", "Submitted"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.application_id.clone(),
            or_dash(self.applicant_name.as_deref()),
            self.device_summary(),
            or_dash(self.region.as_deref()),
            self.application_status.to_string(),
            date(self.created_at.as_ref()),
        ]
    }
}
