//! Boundary with the external admin REST API.
//!
//! [`AdminApi`] lists every capability the client depends on. The production
//! implementation is [`HttpAdminClient`]; the API worker and the driver only see
//! the trait, which keeps them testable against an in-memory fake.
//!
//! - `envelope`: response envelope decoding into typed results
//! - `client`: reqwest-based implementation with bearer-token attachment

pub mod client;
pub mod envelope;

pub use client::HttpAdminClient;
pub use envelope::Ack;

use crate::domain::error::Result;
use crate::domain::{
    Application, ApplicationStats, ApplicationStatusUpdate, ClientStatusUpdate, ClientUser,
    DashboardSummary, InvoiceInfo, LoginRequest, LoginResponse, OperationalUser,
    RegisterOperationalRequest, StatisticsKind, StatisticsSnapshot, UserSummary,
};
use async_trait::async_trait;

/// Which rendition of an invoice document to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceDocument {
    /// Inline rendition (`.../invoice/view`).
    View,
    /// Attachment rendition (`.../invoice/download`).
    Download,
}

/// Every call the dashboard makes against the admin API.
///
/// Reads return decoded records; writes return an [`Ack`]. Any failure,
/// whether transport, HTTP status or `success: false`, is an `Err`.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /admin/dashboard`
    async fn dashboard(&self) -> Result<DashboardSummary>;

    /// `GET /admin/all-users`
    async fn all_users(&self) -> Result<Vec<UserSummary>>;

    /// `GET /admin/client-users`
    async fn client_users(&self) -> Result<Vec<ClientUser>>;

    /// `GET /admin/client-users/:id`
    async fn client_user(&self, id: &str) -> Result<ClientUser>;

    /// `PATCH /admin/client-users/:id/status`
    async fn update_client_status(&self, id: &str, update: &ClientStatusUpdate) -> Result<Ack>;

    /// `GET /admin/operational-users`
    async fn operational_users(&self) -> Result<Vec<OperationalUser>>;

    /// `GET /admin/operational-users/:id`
    async fn operational_user(&self, id: &str) -> Result<OperationalUser>;

    /// `GET /admin/statistics[/enhanced|/dashboard]`
    async fn statistics(&self, kind: StatisticsKind) -> Result<StatisticsSnapshot>;

    /// `GET /admin/search?query=`
    async fn search(&self, query: &str) -> Result<Vec<UserSummary>>;

    /// `GET /admin/client-users/:id/invoice`
    async fn invoice_info(&self, id: &str) -> Result<InvoiceInfo>;

    /// `GET /admin/client-users/:id/invoice/{view,download}`
    async fn invoice_document(&self, id: &str, document: InvoiceDocument) -> Result<Vec<u8>>;

    /// `GET /applications/admin/applications`
    async fn applications(&self) -> Result<Vec<Application>>;

    /// `GET /applications/admin/applications/stats`
    async fn application_stats(&self) -> Result<ApplicationStats>;

    /// `PUT /applications/admin/applications/:id/status`
    async fn update_application_status(&self, id: &str, update: &ApplicationStatusUpdate) -> Result<Ack>;

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// `POST /auth/register-operational`
    async fn register_operational(&self, request: &RegisterOperationalRequest) -> Result<Ack>;
}
