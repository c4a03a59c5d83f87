//! Request and response protocol between the view layer and the API worker.
//!
//! Every request carries an optional [`TraceContext`] so the worker task's spans
//! are linked to the span of the event that issued it. Load requests carry the
//! [`RequestTicket`] of the view that issued them and the worker echoes it back
//! in the response; the view uses it to discard responses it no longer wants.

use crate::app::modes::{RequestTicket, ViewKind};
use crate::domain::{
    Application, ApplicationStats, ApplicationStatusUpdate, ClientStatusUpdate, ClientUser,
    DashboardSummary, OperationalUser, StatisticsKind, StatisticsSnapshot, UserSummary,
};

/// Trace and parent span IDs captured on the issuing side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current tracing span.
    ///
    /// Returns `None` when the span has no valid context, e.g. when tracing is
    /// not initialised.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Creates a `", stringify!($variant), "` request with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

api_request_builders! {
    load_client_users(LoadClientUsers { ticket: RequestTicket }),
    load_operational_users(LoadOperationalUsers { ticket: RequestTicket }),
    load_all_users(LoadAllUsers { ticket: RequestTicket }),
    search(Search { ticket: RequestTicket, query: String }),
    load_applications(LoadApplications { ticket: RequestTicket }),
    load_dashboard(LoadDashboard { ticket: RequestTicket }),
    load_statistics(LoadStatistics { ticket: RequestTicket, kind: StatisticsKind }),
    load_application_stats(LoadApplicationStats { ticket: RequestTicket }),
    update_client_status(UpdateClientStatus { view: ViewKind, id: String, update: ClientStatusUpdate }),
    update_application_status(UpdateApplicationStatus { view: ViewKind, id: String, update: ApplicationStatusUpdate }),
}

/// Work posted to the API worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    LoadClientUsers {
        ticket: RequestTicket,
        trace_context: Option<TraceContext>,
    },
    LoadOperationalUsers {
        ticket: RequestTicket,
        trace_context: Option<TraceContext>,
    },
    LoadAllUsers {
        ticket: RequestTicket,
        trace_context: Option<TraceContext>,
    },
    /// Server-side search; only issued for trimmed queries of at least
    /// [`MIN_SEARCH_LEN`](crate::app::MIN_SEARCH_LEN) characters.
    Search {
        ticket: RequestTicket,
        query: String,
        trace_context: Option<TraceContext>,
    },
    LoadApplications {
        ticket: RequestTicket,
        trace_context: Option<TraceContext>,
    },
    LoadDashboard {
        ticket: RequestTicket,
        trace_context: Option<TraceContext>,
    },
    LoadStatistics {
        ticket: RequestTicket,
        kind: StatisticsKind,
        trace_context: Option<TraceContext>,
    },
    LoadApplicationStats {
        ticket: RequestTicket,
        trace_context: Option<TraceContext>,
    },
    UpdateClientStatus {
        view: ViewKind,
        id: String,
        update: ClientStatusUpdate,
        trace_context: Option<TraceContext>,
    },
    UpdateApplicationStatus {
        view: ViewKind,
        id: String,
        update: ApplicationStatusUpdate,
        trace_context: Option<TraceContext>,
    },
}

impl ApiRequest {
    /// The view whose in-flight work this request belongs to.
    #[must_use]
    pub fn view(&self) -> ViewKind {
        match self {
            Self::LoadClientUsers { ticket, .. }
            | Self::LoadOperationalUsers { ticket, .. }
            | Self::LoadAllUsers { ticket, .. }
            | Self::Search { ticket, .. }
            | Self::LoadApplications { ticket, .. }
            | Self::LoadDashboard { ticket, .. }
            | Self::LoadStatistics { ticket, .. }
            | Self::LoadApplicationStats { ticket, .. } => ticket.view,
            Self::UpdateClientStatus { view, .. } | Self::UpdateApplicationStatus { view, .. } => *view,
        }
    }

    /// Loads may be aborted when their view unmounts; writes always run to
    /// completion.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        !matches!(
            self,
            Self::UpdateClientStatus { .. } | Self::UpdateApplicationStatus { .. }
        )
    }

    /// The failure response a view expects when this request cannot complete.
    #[must_use]
    pub fn failed(&self, message: &str) -> ApiResponse {
        match self {
            Self::LoadClientUsers { ticket, .. }
            | Self::LoadOperationalUsers { ticket, .. }
            | Self::LoadAllUsers { ticket, .. }
            | Self::Search { ticket, .. }
            | Self::LoadApplications { ticket, .. }
            | Self::LoadDashboard { ticket, .. }
            | Self::LoadStatistics { ticket, .. }
            | Self::LoadApplicationStats { ticket, .. } => ApiResponse::LoadFailed {
                ticket: *ticket,
                message: message.to_string(),
            },
            Self::UpdateClientStatus { view, id, .. } | Self::UpdateApplicationStatus { view, id, .. } => {
                ApiResponse::StatusUpdateFailed {
                    view: *view,
                    id: id.clone(),
                    message: message.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadClientUsers { trace_context, .. }
            | Self::LoadOperationalUsers { trace_context, .. }
            | Self::LoadAllUsers { trace_context, .. }
            | Self::Search { trace_context, .. }
            | Self::LoadApplications { trace_context, .. }
            | Self::LoadDashboard { trace_context, .. }
            | Self::LoadStatistics { trace_context, .. }
            | Self::LoadApplicationStats { trace_context, .. }
            | Self::UpdateClientStatus { trace_context, .. }
            | Self::UpdateApplicationStatus { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Results reported by the API worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    ClientUsersLoaded {
        ticket: RequestTicket,
        users: Vec<ClientUser>,
    },
    OperationalUsersLoaded {
        ticket: RequestTicket,
        users: Vec<OperationalUser>,
    },
    /// Users from either the all-users endpoint or a server-side search.
    UsersLoaded {
        ticket: RequestTicket,
        users: Vec<UserSummary>,
    },
    ApplicationsLoaded {
        ticket: RequestTicket,
        applications: Vec<Application>,
    },
    DashboardLoaded {
        ticket: RequestTicket,
        summary: DashboardSummary,
    },
    StatisticsLoaded {
        ticket: RequestTicket,
        snapshot: StatisticsSnapshot,
    },
    ApplicationStatsLoaded {
        ticket: RequestTicket,
        stats: ApplicationStats,
    },
    LoadFailed {
        ticket: RequestTicket,
        message: String,
    },
    StatusUpdated {
        view: ViewKind,
        id: String,
        message: Option<String>,
    },
    StatusUpdateFailed {
        view: ViewKind,
        id: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegistrationStatus;

    fn ticket(view: ViewKind) -> RequestTicket {
        RequestTicket { view, generation: 3 }
    }

    #[test]
    fn builders_without_tracing_carry_no_context() {
        let request = ApiRequest::load_client_users(ticket(ViewKind::ClientUsers));
        assert!(request.trace_context().is_none());
        assert_eq!(request.view(), ViewKind::ClientUsers);
    }

    #[test]
    fn only_loads_are_cancellable() {
        assert!(ApiRequest::search(ticket(ViewKind::Search), "ab".to_string()).is_cancellable());

        let update = ClientStatusUpdate::new(RegistrationStatus::Verified, None).unwrap();
        let write = ApiRequest::update_client_status(ViewKind::ClientUsers, "7".to_string(), update);
        assert!(!write.is_cancellable());
        assert_eq!(write.view(), ViewKind::ClientUsers);
    }

    #[test]
    fn failure_matches_the_request_kind() {
        let load = ApiRequest::load_applications(ticket(ViewKind::Applications));
        assert!(matches!(
            load.failed("down"),
            ApiResponse::LoadFailed { ticket: t, message } if t == ticket(ViewKind::Applications) && message == "down"
        ));

        let update = ClientStatusUpdate::new(RegistrationStatus::Suspended, None).unwrap();
        let write = ApiRequest::update_client_status(ViewKind::ClientUsers, "9".to_string(), update);
        assert!(matches!(
            write.failed("down"),
            ApiResponse::StatusUpdateFailed { view: ViewKind::ClientUsers, id, .. } if id == "9"
        ));
    }
}
