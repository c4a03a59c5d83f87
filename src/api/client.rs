use crate::api::envelope::{decode, decode_ack, decode_list, Ack};
use crate::api::{AdminApi, InvoiceDocument};
use crate::auth::AuthContext;
use crate::domain::error::{DeviceDeskError, Result};
use crate::domain::{
    Application, ApplicationStats, ApplicationStatusUpdate, ClientStatusUpdate, ClientUser,
    DashboardSummary, InvoiceInfo, LoginRequest, LoginResponse, OperationalUser,
    RegisterOperationalRequest, StatisticsKind, StatisticsSnapshot, UserSummary,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::Serialize;
use std::time::Duration;

const DASHBOARD: &str = "/admin/dashboard";
const ALL_USERS: &str = "/admin/all-users";
const CLIENT_USERS: &str = "/admin/client-users";
const OPERATIONAL_USERS: &str = "/admin/operational-users";
const SEARCH: &str = "/admin/search";
const APPLICATIONS: &str = "/applications/admin/applications";
const LOGIN: &str = "/auth/login";
const REGISTER_OPERATIONAL: &str = "/auth/register-operational";

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// reqwest-backed [`AdminApi`].
///
/// Every request carries `Authorization: Bearer <token>` when the shared
/// [`AuthContext`] holds one. Requests are never retried.
#[derive(Debug, Clone)]
pub struct HttpAdminClient {
    api_url: Url,
    client: reqwest::Client,
    auth: AuthContext,
}

impl HttpAdminClient {
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Config`] for an unparsable base URL and
    /// [`DeviceDeskError::Transport`] if the HTTP client cannot be built.
    pub fn create(config: &HttpClientConfig, auth: AuthContext) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| DeviceDeskError::Config(format!("invalid api_url '{}': {e}", config.api_url)))?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("devicedesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { api_url, client, auth })
    }

    /// Joins `path` onto the base URL, keeping any path prefix the base has
    /// (`https://host/api` + `/admin/x` → `https://host/api/admin/x`).
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Config`] if the joined URL is invalid.
    pub fn get_url(&self, path: &str) -> Result<Url> {
        let base = self.api_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| DeviceDeskError::Config(format!("cannot build URL for {path}: {e}")))
    }

    /// URL of the record `id` under `collection`, followed by `tail`
    /// segments. `id` is percent-encoded as a single path segment, so
    /// `/`, `?` and `#` in it cannot change the request target.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceDeskError::Config`] if the base URL cannot take path
    /// segments.
    pub fn record_url(&self, collection: &str, id: &str, tail: &[&str]) -> Result<Url> {
        let mut url = self.get_url(collection)?;
        url.path_segments_mut()
            .map_err(|()| DeviceDeskError::Config(format!("{} cannot hold a record path", self.api_url)))?
            .push(id)
            .extend(tail);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(u16, Vec<u8>)> {
        let request = match self.auth.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::debug!(status, body_len = body.len(), "admin api responded");
        Ok((status, body.to_vec()))
    }

    async fn get(&self, url: Url) -> Result<(u16, Vec<u8>)> {
        self.send(self.client.get(url)).await
    }

    async fn get_with_query<T: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        query: &T,
    ) -> Result<(u16, Vec<u8>)> {
        let url = self.get_url(path)?;
        self.send(self.client.get(url).query(query)).await
    }

    async fn post<T: Serialize + Sync + ?Sized>(&self, url: Url, payload: &T) -> Result<(u16, Vec<u8>)> {
        self.send(self.client.post(url).json(payload)).await
    }

    async fn put<T: Serialize + Sync + ?Sized>(&self, url: Url, payload: &T) -> Result<(u16, Vec<u8>)> {
        self.send(self.client.put(url).json(payload)).await
    }

    async fn patch<T: Serialize + Sync + ?Sized>(&self, url: Url, payload: &T) -> Result<(u16, Vec<u8>)> {
        self.send(self.client.patch(url).json(payload)).await
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn dashboard(&self) -> Result<DashboardSummary> {
        let (status, body) = self.get(self.get_url(DASHBOARD)?).await?;
        decode(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn all_users(&self) -> Result<Vec<UserSummary>> {
        let (status, body) = self.get(self.get_url(ALL_USERS)?).await?;
        decode_list(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn client_users(&self) -> Result<Vec<ClientUser>> {
        let (status, body) = self.get(self.get_url(CLIENT_USERS)?).await?;
        decode_list(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn client_user(&self, id: &str) -> Result<ClientUser> {
        let (status, body) = self.get(self.record_url(CLIENT_USERS, id, &[])?).await?;
        decode(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self, update), fields(status = %update.status))]
    async fn update_client_status(&self, id: &str, update: &ClientStatusUpdate) -> Result<Ack> {
        let url = self.record_url(CLIENT_USERS, id, &["status"])?;
        let (status, body) = self.patch(url, update).await?;
        decode_ack(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn operational_users(&self) -> Result<Vec<OperationalUser>> {
        let (status, body) = self.get(self.get_url(OPERATIONAL_USERS)?).await?;
        decode_list(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn operational_user(&self, id: &str) -> Result<OperationalUser> {
        let (status, body) = self.get(self.record_url(OPERATIONAL_USERS, id, &[])?).await?;
        decode(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn statistics(&self, kind: StatisticsKind) -> Result<StatisticsSnapshot> {
        let (status, body) = self.get(self.get_url(kind.path())?).await?;
        decode(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<UserSummary>> {
        let (status, body) = self.get_with_query(SEARCH, &[("query", query)]).await?;
        decode_list(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn invoice_info(&self, id: &str) -> Result<InvoiceInfo> {
        let (status, body) = self.get(self.record_url(CLIENT_USERS, id, &["invoice"])?).await?;
        decode(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn invoice_document(&self, id: &str, document: InvoiceDocument) -> Result<Vec<u8>> {
        let suffix = match document {
            InvoiceDocument::View => "view",
            InvoiceDocument::Download => "download",
        };
        let url = self.record_url(CLIENT_USERS, id, &["invoice", suffix])?;
        let (status, body) = self.get(url).await?;
        if (200..300).contains(&status) {
            Ok(body)
        } else {
            decode::<serde_json::Value>(status, &body).map(|_| Vec::new())
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn applications(&self) -> Result<Vec<Application>> {
        let (status, body) = self.get(self.get_url(APPLICATIONS)?).await?;
        decode_list(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn application_stats(&self) -> Result<ApplicationStats> {
        let (status, body) = self.get(self.get_url(&format!("{APPLICATIONS}/stats"))?).await?;
        decode(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self, update), fields(status = %update.status))]
    async fn update_application_status(&self, id: &str, update: &ApplicationStatusUpdate) -> Result<Ack> {
        let url = self.record_url(APPLICATIONS, id, &["status"])?;
        let (status, body) = self.put(url, update).await?;
        decode_ack(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let (status, body) = self.post(self.get_url(LOGIN)?, request).await?;
        decode(status, &body)
    }

    #[tracing::instrument(level = "debug", skip(self, request), fields(email = %request.email))]
    async fn register_operational(&self, request: &RegisterOperationalRequest) -> Result<Ack> {
        let (status, body) = self.post(self.get_url(REGISTER_OPERATIONAL)?, request).await?;
        decode_ack(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_keep_the_base_path_prefix() {
        let client = HttpAdminClient::create(
            &HttpClientConfig {
                api_url: "https://admin.example.org/api/".to_string(),
                ..Default::default()
            },
            AuthContext::default(),
        )
        .unwrap();

        assert_eq!(
            client.get_url("/admin/client-users/7/status").unwrap().as_str(),
            "https://admin.example.org/api/admin/client-users/7/status"
        );
    }

    #[test]
    fn record_ids_stay_inside_one_path_segment() {
        let client = HttpAdminClient::create(&HttpClientConfig::default(), AuthContext::default()).unwrap();

        assert_eq!(
            client.record_url(CLIENT_USERS, "7?x=1", &["status"]).unwrap().as_str(),
            "http://127.0.0.1:5000/api/admin/client-users/7%3Fx=1/status"
        );
        assert_eq!(
            client.record_url(CLIENT_USERS, "../operational-users/3", &[]).unwrap().as_str(),
            "http://127.0.0.1:5000/api/admin/client-users/..%2Foperational-users%2F3"
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = HttpAdminClient::create(
            &HttpClientConfig {
                api_url: "not a url".to_string(),
                ..Default::default()
            },
            AuthContext::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DeviceDeskError::Config(_)));
    }
}
