//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place view state changes. It applies one
//! [`Event`] to the [`AppState`] and returns whether anything visible changed
//! together with the side effects to run. It performs no I/O: loads and writes
//! leave as [`Action::PostToWorker`] and come back later as
//! [`Event::WorkerResponse`].
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Unmount`, `Refresh`
//! - **Client-side filtering**: `SetSearchTerm`, `SetStatusFilter`,
//!   `SetRegionFilter`, `SetUserTypeFilter`, `ClearFilters`
//! - **Paging**: `NextPage`, `PreviousPage`, `GoToPage`, `SetPageSize`
//! - **Server search**: `SubmitSearch`
//! - **Mutation**: `OpenStatusDialog`, `SubmitStatusUpdate`, `CloseDialog`
//! - **Worker**: `WorkerResponse`
//!
//! Filter and paging events never touch the network.

use crate::app::dialog::{StatusChoice, StatusDialog};
use crate::app::list_view::ListControl;
use crate::app::modes::{LoadSource, RequestTicket, ViewKind};
use crate::app::{Action, AppState};
use crate::domain::error::{DeviceDeskError, Result};
use crate::domain::StatisticsKind;
use crate::worker::{ApiRequest, ApiResponse};

/// Shortest trimmed query, in characters, that goes to the search endpoint.
/// Anything shorter reloads the unfiltered list instead.
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The view became visible; starts its first load.
    Mount(ViewKind),
    /// The view went away; in-flight loads are cancelled and late responses
    /// discarded.
    Unmount(ViewKind),
    /// Re-invokes the view's loader.
    Refresh(ViewKind),

    SetSearchTerm { view: ViewKind, term: String },
    SetStatusFilter { view: ViewKind, status: Option<String> },
    SetRegionFilter { view: ViewKind, region: Option<String> },
    SetUserTypeFilter { view: ViewKind, user_type: Option<String> },
    ClearFilters(ViewKind),

    NextPage(ViewKind),
    PreviousPage(ViewKind),
    GoToPage { view: ViewKind, page_index: usize },
    SetPageSize { view: ViewKind, page_size: usize },

    /// Submits the server-search input of the all-users or search view.
    SubmitSearch { view: ViewKind, input: String },

    /// Switches the statistics view between basic, enhanced and dashboard.
    SetStatisticsKind(StatisticsKind),

    OpenStatusDialog { view: ViewKind, id: String },
    SubmitStatusUpdate { choice: StatusChoice, reason: Option<String> },
    CloseDialog,

    DismissError(ViewKind),

    WorkerResponse(ApiResponse),
}

/// Applies `event` to `state`.
///
/// Returns `(should_render, actions)`; actions must be executed in order.
///
/// # Errors
///
/// Returns [`DeviceDeskError::Validation`] when the event targets a view that
/// does not support the operation, e.g. a status dialog on the dashboard.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    match event {
        Event::Mount(view) => {
            let request = issue_load(state, *view, true)?;
            Ok((true, vec![Action::PostToWorker(request)]))
        }
        Event::Unmount(view) => {
            unmount(state, *view);
            if state.dialog.as_ref().is_some_and(|d| d.view == *view) {
                state.dialog = None;
            }
            Ok((false, vec![Action::CancelRequests(*view)]))
        }
        Event::Refresh(view) => {
            if !is_mounted(state, *view) {
                tracing::debug!(view = %view, "refresh ignored, view not mounted");
                return Ok((false, vec![]));
            }
            let request = issue_load(state, *view, false)?;
            Ok((true, vec![Action::CancelRequests(*view), Action::PostToWorker(request)]))
        }

        Event::SetSearchTerm { view, term } => {
            let changed = list_mut(state, *view)?.set_search_term(term);
            Ok((changed, vec![]))
        }
        Event::SetStatusFilter { view, status } => {
            let changed = list_mut(state, *view)?.set_status(status.clone());
            Ok((changed, vec![]))
        }
        Event::SetRegionFilter { view, region } => {
            let changed = list_mut(state, *view)?.set_region(region.clone());
            Ok((changed, vec![]))
        }
        Event::SetUserTypeFilter { view, user_type } => {
            let changed = list_mut(state, *view)?.set_user_type(user_type.clone());
            Ok((changed, vec![]))
        }
        Event::ClearFilters(view) => {
            let changed = list_mut(state, *view)?.clear_filters();
            Ok((changed, vec![]))
        }

        Event::NextPage(view) => Ok((list_mut(state, *view)?.next_page(), vec![])),
        Event::PreviousPage(view) => Ok((list_mut(state, *view)?.previous_page(), vec![])),
        Event::GoToPage { view, page_index } => {
            list_mut(state, *view)?.go_to_page(*page_index);
            Ok((true, vec![]))
        }
        Event::SetPageSize { view, page_size } => {
            list_mut(state, *view)?.set_page_size(*page_size);
            Ok((true, vec![]))
        }

        Event::SubmitSearch { view, input } => submit_search(state, *view, input),

        Event::SetStatisticsKind(kind) => {
            if state.statistics_kind == *kind {
                return Ok((false, vec![]));
            }
            state.statistics_kind = *kind;
            if !state.statistics.is_mounted() {
                return Ok((false, vec![]));
            }
            let request = issue_load(state, ViewKind::Statistics, false)?;
            Ok((
                true,
                vec![Action::CancelRequests(ViewKind::Statistics), Action::PostToWorker(request)],
            ))
        }

        Event::OpenStatusDialog { view, id } => {
            if !view.supports_status_update() {
                return Err(DeviceDeskError::Validation(format!("{view} has no status updates")));
            }
            let list = list_mut(state, *view)?;
            if !list.contains(id) {
                list.set_error(format!("Record {id} is not in the loaded list"));
                return Ok((true, vec![]));
            }
            state.dialog = Some(StatusDialog::new(*view, id.clone()));
            Ok((true, vec![]))
        }
        Event::SubmitStatusUpdate { choice, reason } => {
            let Some(dialog) = state.dialog.as_mut() else {
                tracing::debug!("status submit without an open dialog");
                return Ok((false, vec![]));
            };
            if dialog.submitting {
                return Ok((false, vec![]));
            }
            match dialog.build_request(*choice, reason.as_deref()) {
                Ok(request) => {
                    dialog.submitting = true;
                    dialog.error = None;
                    Ok((true, vec![Action::PostToWorker(request)]))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "status update rejected locally");
                    dialog.error = Some(e.user_message());
                    Ok((true, vec![]))
                }
            }
        }
        Event::CloseDialog => Ok((state.dialog.take().is_some(), vec![])),

        Event::DismissError(view) => {
            let dismissed = match view {
                ViewKind::Dashboard => state.dashboard.dismiss_error(),
                ViewKind::Statistics => state.statistics.dismiss_error(),
                ViewKind::ApplicationStats => state.application_stats.dismiss_error(),
                list => list_mut(state, *list)?.dismiss_error(),
            };
            Ok((dismissed, vec![]))
        }

        Event::WorkerResponse(response) => handle_response(state, response),
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount(_) => "mount",
        Event::Unmount(_) => "unmount",
        Event::Refresh(_) => "refresh",
        Event::SetSearchTerm { .. } => "set_search_term",
        Event::SetStatusFilter { .. } => "set_status_filter",
        Event::SetRegionFilter { .. } => "set_region_filter",
        Event::SetUserTypeFilter { .. } => "set_user_type_filter",
        Event::ClearFilters(_) => "clear_filters",
        Event::NextPage(_) => "next_page",
        Event::PreviousPage(_) => "previous_page",
        Event::GoToPage { .. } => "go_to_page",
        Event::SetPageSize { .. } => "set_page_size",
        Event::SubmitSearch { .. } => "submit_search",
        Event::SetStatisticsKind(_) => "set_statistics_kind",
        Event::OpenStatusDialog { .. } => "open_status_dialog",
        Event::SubmitStatusUpdate { .. } => "submit_status_update",
        Event::CloseDialog => "close_dialog",
        Event::DismissError(_) => "dismiss_error",
        Event::WorkerResponse(_) => "worker_response",
    }
}

fn list_mut(state: &mut AppState, view: ViewKind) -> Result<&mut dyn ListControl> {
    state
        .list_mut(view)
        .ok_or_else(|| DeviceDeskError::Validation(format!("{view} is not a list view")))
}

fn is_mounted(state: &AppState, view: ViewKind) -> bool {
    match view {
        ViewKind::Dashboard => state.dashboard.is_mounted(),
        ViewKind::Statistics => state.statistics.is_mounted(),
        ViewKind::ApplicationStats => state.application_stats.is_mounted(),
        list => state.list(list).is_some_and(ListControl::is_mounted),
    }
}

fn unmount(state: &mut AppState, view: ViewKind) {
    match view {
        ViewKind::Dashboard => state.dashboard.unmount(),
        ViewKind::Statistics => state.statistics.unmount(),
        ViewKind::ApplicationStats => state.application_stats.unmount(),
        list => {
            if let Some(list) = state.list_mut(list) {
                list.unmount();
            }
        }
    }
}

/// Starts a load on `view` (mounting it first if asked) and builds the request.
fn issue_load(state: &mut AppState, view: ViewKind, mount: bool) -> Result<ApiRequest> {
    let request = match view {
        ViewKind::Dashboard => {
            let ticket = if mount { state.dashboard.mount() } else { state.dashboard.begin_load() };
            ApiRequest::load_dashboard(ticket)
        }
        ViewKind::Statistics => {
            let ticket = if mount { state.statistics.mount() } else { state.statistics.begin_load() };
            ApiRequest::load_statistics(ticket, state.statistics_kind)
        }
        ViewKind::ApplicationStats => {
            let ticket = if mount {
                state.application_stats.mount()
            } else {
                state.application_stats.begin_load()
            };
            ApiRequest::load_application_stats(ticket)
        }
        list => {
            let list = list_mut(state, list)?;
            let ticket = if mount { list.mount() } else { list.begin_load() };
            list_request(ticket, list.source())
        }
    };
    tracing::debug!(view = %view, "load issued");
    Ok(request)
}

fn list_request(ticket: RequestTicket, source: &LoadSource) -> ApiRequest {
    match (ticket.view, source) {
        (ViewKind::ClientUsers, _) => ApiRequest::load_client_users(ticket),
        (ViewKind::OperationalUsers, _) => ApiRequest::load_operational_users(ticket),
        (ViewKind::Applications, _) => ApiRequest::load_applications(ticket),
        (_, LoadSource::Search(query)) => ApiRequest::search(ticket, query.clone()),
        (_, LoadSource::All) => ApiRequest::load_all_users(ticket),
    }
}

fn submit_search(state: &mut AppState, view: ViewKind, input: &str) -> Result<(bool, Vec<Action>)> {
    if !view.supports_server_search() {
        return Err(DeviceDeskError::Validation(format!("{view} has no server search")));
    }
    state.search_input = input.to_string();

    let query = input.trim();
    let source = if query.chars().count() >= MIN_SEARCH_LEN {
        LoadSource::Search(query.to_string())
    } else {
        tracing::debug!(query_len = query.chars().count(), "query too short, reloading unfiltered list");
        LoadSource::All
    };

    let list = list_mut(state, view)?;
    list.set_source(source);
    list.go_to_page(0);
    if !list.is_mounted() {
        return Ok((true, vec![]));
    }

    let request = issue_load(state, view, false)?;
    Ok((true, vec![Action::CancelRequests(view), Action::PostToWorker(request)]))
}

fn handle_response(state: &mut AppState, response: &ApiResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        ApiResponse::ClientUsersLoaded { ticket, users } => {
            Ok((state.client_users.apply_loaded(*ticket, Ok(users.clone())), vec![]))
        }
        ApiResponse::OperationalUsersLoaded { ticket, users } => {
            Ok((state.operational_users.apply_loaded(*ticket, Ok(users.clone())), vec![]))
        }
        ApiResponse::UsersLoaded { ticket, users } => {
            let applied = match ticket.view {
                ViewKind::AllUsers => state.all_users.apply_loaded(*ticket, Ok(users.clone())),
                ViewKind::Search => state.search.apply_loaded(*ticket, Ok(users.clone())),
                other => {
                    tracing::debug!(view = %other, "user list for a view that does not show users");
                    false
                }
            };
            Ok((applied, vec![]))
        }
        ApiResponse::ApplicationsLoaded { ticket, applications } => {
            Ok((state.applications.apply_loaded(*ticket, Ok(applications.clone())), vec![]))
        }
        ApiResponse::DashboardLoaded { ticket, summary } => {
            Ok((state.dashboard.apply_loaded(*ticket, Ok(summary.clone())), vec![]))
        }
        ApiResponse::StatisticsLoaded { ticket, snapshot } => {
            Ok((state.statistics.apply_loaded(*ticket, Ok(snapshot.clone())), vec![]))
        }
        ApiResponse::ApplicationStatsLoaded { ticket, stats } => {
            Ok((state.application_stats.apply_loaded(*ticket, Ok(stats.clone())), vec![]))
        }
        ApiResponse::LoadFailed { ticket, message } => {
            let applied = match ticket.view {
                ViewKind::Dashboard => state.dashboard.apply_loaded(*ticket, Err(message.clone())),
                ViewKind::Statistics => state.statistics.apply_loaded(*ticket, Err(message.clone())),
                ViewKind::ApplicationStats => {
                    state.application_stats.apply_loaded(*ticket, Err(message.clone()))
                }
                list => list_mut(state, list)?.apply_failed(*ticket, message.clone()),
            };
            Ok((applied, vec![]))
        }
        ApiResponse::StatusUpdated { view, id, message } => {
            tracing::debug!(view = %view, id = %id, message = ?message, "status updated, reloading");
            if state.dialog.as_ref().is_some_and(|d| d.targets(*view, id)) {
                state.dialog = None;
            }
            if !is_mounted(state, *view) {
                return Ok((true, vec![]));
            }
            let request = issue_load(state, *view, false)?;
            Ok((true, vec![Action::CancelRequests(*view), Action::PostToWorker(request)]))
        }
        ApiResponse::StatusUpdateFailed { view, id, message } => {
            match state.dialog.as_mut().filter(|d| d.targets(*view, id)) {
                Some(dialog) => {
                    dialog.submitting = false;
                    dialog.error = Some(message.clone());
                }
                None => list_mut(state, *view)?.set_error(message.clone()),
            }
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientUser, RegistrationStatus};

    fn client(id: &str) -> ClientUser {
        ClientUser {
            id: id.to_string(),
            first_name: "Ayanda".to_string(),
            last_name: "Zulu".to_string(),
            email: format!("ayanda{id}@example.org"),
            phone: None,
            persal_id: None,
            department: None,
            region: Some("KwaZulu-Natal".to_string()),
            registration_status: RegistrationStatus::Pending,
            created_at: None,
        }
    }

    fn posted(actions: &[Action]) -> Vec<&ApiRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::PostToWorker(r) => Some(r),
                Action::CancelRequests(_) => None,
            })
            .collect()
    }

    fn mounted_clients(state: &mut AppState) {
        let (_, actions) = handle_event(state, &Event::Mount(ViewKind::ClientUsers)).unwrap();
        let ticket = match posted(&actions)[0] {
            ApiRequest::LoadClientUsers { ticket, .. } => *ticket,
            other => panic!("unexpected {other:?}"),
        };
        let response = ApiResponse::ClientUsersLoaded {
            ticket,
            users: vec![client("1"), client("2")],
        };
        handle_event(state, &Event::WorkerResponse(response)).unwrap();
    }

    #[test]
    fn filter_events_issue_no_requests() {
        let mut state = AppState::default();
        mounted_clients(&mut state);
        let (changed, actions) = handle_event(
            &mut state,
            &Event::SetSearchTerm {
                view: ViewKind::ClientUsers,
                term: "ayanda1".to_string(),
            },
        )
        .unwrap();
        assert!(changed);
        assert!(actions.is_empty());
        assert_eq!(state.client_users.derived().len(), 1);
    }

    #[test]
    fn short_query_falls_back_to_unfiltered_loader() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::Mount(ViewKind::Search)).unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitSearch {
                view: ViewKind::Search,
                input: " a ".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(posted(&actions)[..], [ApiRequest::LoadAllUsers { .. }]));

        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitSearch {
                view: ViewKind::Search,
                input: " ab ".to_string(),
            },
        )
        .unwrap();
        match posted(&actions)[..] {
            [ApiRequest::Search { query, .. }] => assert_eq!(query, "ab"),
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejection_without_reason_keeps_dialog_open_and_posts_nothing() {
        let mut state = AppState::default();
        mounted_clients(&mut state);
        handle_event(
            &mut state,
            &Event::OpenStatusDialog {
                view: ViewKind::ClientUsers,
                id: "2".to_string(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitStatusUpdate {
                choice: StatusChoice::Registration(RegistrationStatus::Rejected),
                reason: Some("  ".to_string()),
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        let dialog = state.dialog.as_ref().unwrap();
        assert_eq!(dialog.error.as_deref(), Some("A reason is required when rejecting."));
        assert!(!dialog.submitting);
    }

    #[test]
    fn successful_update_closes_dialog_and_reloads_once() {
        let mut state = AppState::default();
        mounted_clients(&mut state);
        handle_event(
            &mut state,
            &Event::OpenStatusDialog {
                view: ViewKind::ClientUsers,
                id: "1".to_string(),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(ApiResponse::StatusUpdated {
                view: ViewKind::ClientUsers,
                id: "1".to_string(),
                message: None,
            }),
        )
        .unwrap();
        assert!(state.dialog.is_none());
        assert!(matches!(posted(&actions)[..], [ApiRequest::LoadClientUsers { .. }]));
    }

    #[test]
    fn failed_update_keeps_dialog_with_server_message() {
        let mut state = AppState::default();
        mounted_clients(&mut state);
        state.dialog = Some(StatusDialog {
            submitting: true,
            ..StatusDialog::new(ViewKind::ClientUsers, "1".to_string())
        });

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(ApiResponse::StatusUpdateFailed {
                view: ViewKind::ClientUsers,
                id: "1".to_string(),
                message: "User already verified".to_string(),
            }),
        )
        .unwrap();
        assert!(actions.is_empty());
        let dialog = state.dialog.as_ref().unwrap();
        assert_eq!(dialog.error.as_deref(), Some("User already verified"));
        assert!(!dialog.submitting);
    }

    #[test]
    fn dialog_for_unknown_row_sets_banner() {
        let mut state = AppState::default();
        mounted_clients(&mut state);
        handle_event(
            &mut state,
            &Event::OpenStatusDialog {
                view: ViewKind::ClientUsers,
                id: "99".to_string(),
            },
        )
        .unwrap();
        assert!(state.dialog.is_none());
        assert!(state.client_users.error().is_some());
    }

    #[test]
    fn dialog_on_dashboard_is_an_error() {
        let mut state = AppState::default();
        let err = handle_event(
            &mut state,
            &Event::OpenStatusDialog {
                view: ViewKind::Dashboard,
                id: "1".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn unmount_cancels_and_closes_dialog() {
        let mut state = AppState::default();
        mounted_clients(&mut state);
        state.dialog = Some(StatusDialog::new(ViewKind::ClientUsers, "1".to_string()));

        let (_, actions) = handle_event(&mut state, &Event::Unmount(ViewKind::ClientUsers)).unwrap();
        assert_eq!(actions, vec![Action::CancelRequests(ViewKind::ClientUsers)]);
        assert!(state.dialog.is_none());

        let (_, actions) = handle_event(&mut state, &Event::Refresh(ViewKind::ClientUsers)).unwrap();
        assert!(actions.is_empty());
    }
}
