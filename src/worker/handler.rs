//! Execution of [`ApiRequest`]s against an [`AdminApi`].
//!
//! [`ApiWorker::handle_message`] turns one request into one response. It never
//! fails: every API error is reported as a failure variant carrying the message
//! the user should see.

use crate::api::AdminApi;
use crate::app::modes::{RequestTicket, ViewKind};
use crate::domain::error::Result;
use crate::worker::{ApiRequest, ApiResponse, TraceContext};
use std::sync::Arc;
use tracing::Instrument;

pub struct ApiWorker<A: ?Sized> {
    api: Arc<A>,
}

impl<A: AdminApi + ?Sized> ApiWorker<A> {
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Maps a load result to its response with consistent logging.
    fn handle_result<T, F>(operation: &str, ticket: RequestTicket, result: Result<T>, on_success: F) -> ApiResponse
    where
        F: FnOnce(T) -> ApiResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, generation = ticket.generation, "api operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation, error = %e, "api operation failed");
                ApiResponse::LoadFailed {
                    ticket,
                    message: e.user_message(),
                }
            }
        }
    }

    fn handle_write_result<T>(
        operation: &str,
        view: ViewKind,
        id: String,
        result: Result<T>,
        message: impl FnOnce(T) -> Option<String>,
    ) -> ApiResponse {
        match result {
            Ok(value) => {
                tracing::debug!(operation, id = %id, "api write successful");
                ApiResponse::StatusUpdated {
                    view,
                    id,
                    message: message(value),
                }
            }
            Err(e) => {
                tracing::debug!(operation, id = %id, error = %e, "api write failed");
                ApiResponse::StatusUpdateFailed {
                    view,
                    id,
                    message: e.user_message(),
                }
            }
        }
    }

    /// Runs `message` and returns its response.
    ///
    /// The work runs in a span parented to the trace context captured when the
    /// request was built, so it nests under the event that caused it.
    pub async fn handle_message(&self, message: ApiRequest) -> ApiResponse {
        let span = tracing::debug_span!("worker_handle_message", view = %message.view());
        if let Some(parent) = message.trace_context().and_then(parent_context) {
            use tracing_opentelemetry::OpenTelemetrySpanExt;
            span.set_parent(parent);
        }
        self.dispatch(message).instrument(span).await
    }

    async fn dispatch(&self, message: ApiRequest) -> ApiResponse {
        match message {
            ApiRequest::LoadClientUsers { ticket, .. } => Self::handle_result(
                "load client users",
                ticket,
                self.api.client_users().await,
                |users| ApiResponse::ClientUsersLoaded { ticket, users },
            ),
            ApiRequest::LoadOperationalUsers { ticket, .. } => Self::handle_result(
                "load operational users",
                ticket,
                self.api.operational_users().await,
                |users| ApiResponse::OperationalUsersLoaded { ticket, users },
            ),
            ApiRequest::LoadAllUsers { ticket, .. } => Self::handle_result(
                "load all users",
                ticket,
                self.api.all_users().await,
                |users| ApiResponse::UsersLoaded { ticket, users },
            ),
            ApiRequest::Search { ticket, query, .. } => Self::handle_result(
                "search users",
                ticket,
                self.api.search(&query).await,
                |users| {
                    tracing::debug!(query = %query, hits = users.len(), "search finished");
                    ApiResponse::UsersLoaded { ticket, users }
                },
            ),
            ApiRequest::LoadApplications { ticket, .. } => Self::handle_result(
                "load applications",
                ticket,
                self.api.applications().await,
                |applications| ApiResponse::ApplicationsLoaded { ticket, applications },
            ),
            ApiRequest::LoadDashboard { ticket, .. } => Self::handle_result(
                "load dashboard",
                ticket,
                self.api.dashboard().await,
                |summary| ApiResponse::DashboardLoaded { ticket, summary },
            ),
            ApiRequest::LoadStatistics { ticket, kind, .. } => Self::handle_result(
                "load statistics",
                ticket,
                self.api.statistics(kind).await,
                |snapshot| ApiResponse::StatisticsLoaded { ticket, snapshot },
            ),
            ApiRequest::LoadApplicationStats { ticket, .. } => Self::handle_result(
                "load application stats",
                ticket,
                self.api.application_stats().await,
                |stats| ApiResponse::ApplicationStatsLoaded { ticket, stats },
            ),
            ApiRequest::UpdateClientStatus { view, id, update, .. } => {
                let result = self.api.update_client_status(&id, &update).await;
                Self::handle_write_result("update client status", view, id, result, |ack| ack.message)
            }
            ApiRequest::UpdateApplicationStatus { view, id, update, .. } => {
                let result = self.api.update_application_status(&id, &update).await;
                Self::handle_write_result("update application status", view, id, result, |ack| ack.message)
            }
        }
    }
}

/// Rebuilds the remote OpenTelemetry context from a captured [`TraceContext`].
fn parent_context(trace_context: &TraceContext) -> Option<opentelemetry::Context> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;
    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

    Some(opentelemetry::Context::new().with_remote_span_context(span_context))
}
