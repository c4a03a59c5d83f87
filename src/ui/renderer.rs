//! Top-level rendering coordinator.
//!
//! List views go `AppState → compute_viewmodel → UIViewModel → text`;
//! single-record views are rendered straight from their record. All functions
//! return the finished text and leave printing to the caller.

use crate::app::modes::ViewKind;
use crate::app::AppState;
use crate::domain::{
    ApplicationStats, ClientUser, DashboardSummary, InvoiceInfo, OperationalUser, StatisticsKind,
    StatisticsSnapshot,
};
use crate::ui::components;
use crate::ui::viewmodel::{DisplayRow, Tabular, UIViewModel};

/// Renders the current state of `view`.
#[must_use]
pub fn render(state: &AppState, view: ViewKind) -> String {
    if let Some(vm) = state.compute_viewmodel(view) {
        return render_viewmodel(&vm);
    }

    let body = match view {
        ViewKind::Dashboard => state.dashboard.data().map(render_dashboard),
        ViewKind::Statistics => state
            .statistics
            .data()
            .map(|snapshot| render_statistics(state.statistics_kind, snapshot)),
        ViewKind::ApplicationStats => state.application_stats.data().map(render_application_stats),
        _ => None,
    };

    let mut sections = vec![view.title().to_string()];
    if let Some(error) = state.error(view) {
        sections.push(components::render_banner(error));
    }
    sections.push(body.unwrap_or_else(|| "No data loaded".to_string()));
    sections.join("\n")
}

/// Header, banner, table or empty state, footer, then the dialog if open.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel) -> String {
    let mut sections = vec![components::render_header(&vm.header)];
    if let Some(banner) = &vm.banner {
        sections.push(components::render_banner(banner));
    }
    match &vm.empty_state {
        Some(empty) => sections.push(components::render_empty_state(empty)),
        None => sections.push(components::render_rows(&vm.columns, &vm.rows)),
    }
    sections.push(components::render_footer(&vm.footer));
    if let Some(dialog) = &vm.dialog {
        sections.push(components::render_dialog(dialog));
    }
    sections.join("\n")
}

#[must_use]
pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let counts = components::render_key_values(&[
        ("Client users", summary.total_client_users.to_string()),
        ("Pending verifications", summary.pending_verifications.to_string()),
        ("Verified", summary.verified_users.to_string()),
        ("Rejected", summary.rejected_users.to_string()),
        ("Suspended", summary.suspended_users.to_string()),
        ("Operational users", summary.total_operational_users.to_string()),
        ("Applications", summary.total_applications.to_string()),
        ("Pending applications", summary.pending_applications.to_string()),
    ]);
    if summary.recent_registrations.is_empty() {
        return counts;
    }

    let rows: Vec<DisplayRow> = summary
        .recent_registrations
        .iter()
        .map(|user| DisplayRow {
            key: user.id.clone(),
            cells: user.cells(),
        })
        .collect();
    format!(
        "{counts}\nRecent registrations\n{}",
        components::render_rows(&ClientUser::columns(), &rows)
    )
}

#[must_use]
pub fn render_statistics(kind: StatisticsKind, snapshot: &StatisticsSnapshot) -> String {
    let mut sections = vec![format!("{kind} statistics · {} users", snapshot.total_users)];
    for (title, breakdown) in [
        ("By status", &snapshot.by_status),
        ("By role", &snapshot.by_role),
        ("By region", &snapshot.by_region),
    ] {
        if breakdown.is_empty() {
            continue;
        }
        let pairs: Vec<(&str, String)> = breakdown.iter().map(|(k, v)| (k.as_str(), v.to_string())).collect();
        sections.push(format!("{title}\n{}", components::render_key_values(&pairs)));
    }
    if !snapshot.monthly_trends.is_empty() {
        let pairs: Vec<(&str, String)> = snapshot
            .monthly_trends
            .iter()
            .map(|m| (m.month.as_str(), m.count.to_string()))
            .collect();
        sections.push(format!("Monthly registrations\n{}", components::render_key_values(&pairs)));
    }
    sections.join("\n")
}

#[must_use]
pub fn render_application_stats(stats: &ApplicationStats) -> String {
    components::render_key_values(&[
        ("Total", stats.total.to_string()),
        ("Pending", stats.pending.to_string()),
        ("Approved", stats.approved.to_string()),
        ("Rejected", stats.rejected.to_string()),
        ("Cancelled", stats.cancelled.to_string()),
    ])
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[must_use]
pub fn render_client_user(user: &ClientUser) -> String {
    components::render_key_values(&[
        ("ID", user.id.clone()),
        ("Name", user.full_name()),
        ("Email", user.email.clone()),
        ("Phone", text(user.phone.as_deref())),
        ("Persal ID", text(user.persal_id.as_deref())),
        ("Department", text(user.department.as_deref())),
        ("Region", text(user.region.as_deref())),
        ("Status", user.registration_status.to_string()),
        (
            "Registered",
            user.created_at.map_or_else(|| "-".to_string(), |d| d.to_rfc3339()),
        ),
    ])
}

#[must_use]
pub fn render_operational_user(user: &OperationalUser) -> String {
    components::render_key_values(&[
        ("ID", user.id.clone()),
        ("Name", user.full_name()),
        ("Email", user.email.clone()),
        ("Phone", text(user.phone.as_deref())),
        ("Role", user.role.to_string()),
        ("Region", text(user.region.as_deref())),
        (
            "Status",
            user.registration_status.map_or_else(|| "-".to_string(), |s| s.to_string()),
        ),
    ])
}

#[must_use]
pub fn render_invoice(invoice: &InvoiceInfo) -> String {
    if !invoice.available {
        return "No invoice available".to_string();
    }
    let amount = match (invoice.amount, invoice.currency.as_deref()) {
        (Some(amount), Some(currency)) => format!("{currency} {amount:.2}"),
        (Some(amount), None) => format!("{amount:.2}"),
        (None, _) => "-".to_string(),
    };
    components::render_key_values(&[
        ("Invoice", text(invoice.invoice_number.as_deref())),
        ("Amount", amount),
        ("Issued", text(invoice.issued_at.as_deref())),
    ])
}
