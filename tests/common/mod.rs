//! Recording in-memory [`AdminApi`] shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use devicedesk::api::{Ack, AdminApi, InvoiceDocument};
use devicedesk::domain::{
    Application, ApplicationStats, ApplicationStatus, ApplicationStatusUpdate, ClientStatusUpdate, ClientUser,
    DashboardSummary, DeviceDeskError, InvoiceInfo, LoginRequest, LoginResponse, OperationalUser,
    RegisterOperationalRequest, RegistrationStatus, Result, StatisticsKind, StatisticsSnapshot, UserSummary,
    UserType,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Dashboard,
    AllUsers,
    ClientUsers,
    OperationalUsers,
    Applications,
    ApplicationStats,
    Statistics(StatisticsKind),
    Search(String),
    UpdateClientStatus { id: String, update: ClientStatusUpdate },
    UpdateApplicationStatus { id: String, update: ApplicationStatusUpdate },
    Login(String),
    RegisterOperational(String),
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    clients: Mutex<Vec<ClientUser>>,
    applications: Mutex<Vec<Application>>,
    users: Vec<UserSummary>,
    search_delays: HashMap<String, Duration>,
    search_panics: Option<String>,
    write_error: Option<String>,
    fail_reads: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(self, clients: Vec<ClientUser>) -> Self {
        *self.clients.lock().unwrap() = clients;
        self
    }

    pub fn with_applications(self, applications: Vec<Application>) -> Self {
        *self.applications.lock().unwrap() = applications;
        self
    }

    pub fn with_users(mut self, users: Vec<UserSummary>) -> Self {
        self.users = users;
        self
    }

    pub fn with_search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_search_panic(mut self, query: &str) -> Self {
        self.search_panics = Some(query.to_string());
        self
    }

    pub fn failing_writes(mut self, message: &str) -> Self {
        self.write_error = Some(message.to_string());
        self
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn client(&self, id: &str) -> Option<ClientUser> {
        self.clients.lock().unwrap().iter().find(|c| c.id == id).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn read<T>(&self, value: impl FnOnce() -> T) -> Result<T> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DeviceDeskError::Server {
                status: 500,
                message: "Database unavailable".to_string(),
            });
        }
        Ok(value())
    }

    fn write_outcome(&self) -> Result<Ack> {
        match &self.write_error {
            Some(message) => Err(DeviceDeskError::Server {
                status: 404,
                message: message.clone(),
            }),
            None => Ok(Ack {
                message: Some("Status updated".to_string()),
            }),
        }
    }
}

fn not_found(what: &str) -> DeviceDeskError {
    DeviceDeskError::Server {
        status: 404,
        message: format!("{what} not found"),
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn dashboard(&self) -> Result<DashboardSummary> {
        self.record(Call::Dashboard);
        let clients = self.clients.lock().unwrap().len() as u64;
        self.read(|| DashboardSummary {
            total_client_users: clients,
            ..Default::default()
        })
    }

    async fn all_users(&self) -> Result<Vec<UserSummary>> {
        self.record(Call::AllUsers);
        self.read(|| self.users.clone())
    }

    async fn client_users(&self) -> Result<Vec<ClientUser>> {
        self.record(Call::ClientUsers);
        self.read(|| self.clients.lock().unwrap().clone())
    }

    async fn client_user(&self, id: &str) -> Result<ClientUser> {
        self.client(id).ok_or_else(|| not_found("Client"))
    }

    async fn update_client_status(&self, id: &str, update: &ClientStatusUpdate) -> Result<Ack> {
        self.record(Call::UpdateClientStatus {
            id: id.to_string(),
            update: update.clone(),
        });
        let ack = self.write_outcome()?;
        if let Some(client) = self.clients.lock().unwrap().iter_mut().find(|c| c.id == id) {
            client.registration_status = update.status;
        }
        Ok(ack)
    }

    async fn operational_users(&self) -> Result<Vec<OperationalUser>> {
        self.record(Call::OperationalUsers);
        self.read(Vec::new)
    }

    async fn operational_user(&self, _id: &str) -> Result<OperationalUser> {
        Err(not_found("Operational user"))
    }

    async fn statistics(&self, kind: StatisticsKind) -> Result<StatisticsSnapshot> {
        self.record(Call::Statistics(kind));
        self.read(StatisticsSnapshot::default)
    }

    async fn search(&self, query: &str) -> Result<Vec<UserSummary>> {
        self.record(Call::Search(query.to_string()));
        if self.search_panics.as_deref() == Some(query) {
            panic!("search backend crashed on {query:?}");
        }
        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        let needle = query.to_lowercase();
        self.read(|| {
            self.users
                .iter()
                .filter(|u| u.full_name().to_lowercase().contains(&needle))
                .cloned()
                .collect()
        })
    }

    async fn invoice_info(&self, _id: &str) -> Result<InvoiceInfo> {
        Ok(InvoiceInfo::default())
    }

    async fn invoice_document(&self, _id: &str, _document: InvoiceDocument) -> Result<Vec<u8>> {
        Err(not_found("Invoice"))
    }

    async fn applications(&self) -> Result<Vec<Application>> {
        self.record(Call::Applications);
        self.read(|| self.applications.lock().unwrap().clone())
    }

    async fn application_stats(&self) -> Result<ApplicationStats> {
        self.record(Call::ApplicationStats);
        let applications = self.applications.lock().unwrap().clone();
        let count = |status: ApplicationStatus| {
            applications.iter().filter(|a| a.application_status == status).count() as u64
        };
        self.read(|| ApplicationStats {
            total: applications.len() as u64,
            pending: count(ApplicationStatus::Pending),
            approved: count(ApplicationStatus::Approved),
            rejected: count(ApplicationStatus::Rejected),
            cancelled: count(ApplicationStatus::Cancelled),
        })
    }

    async fn update_application_status(&self, id: &str, update: &ApplicationStatusUpdate) -> Result<Ack> {
        self.record(Call::UpdateApplicationStatus {
            id: id.to_string(),
            update: update.clone(),
        });
        let ack = self.write_outcome()?;
        if let Some(app) = self
            .applications
            .lock()
            .unwrap()
            .iter_mut()
            .find(|a| a.application_id == id)
        {
            app.application_status = update.status;
            app.rejection_reason.clone_from(&update.rejection_reason);
        }
        Ok(ack)
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.record(Call::Login(request.email.clone()));
        Ok(LoginResponse {
            token: "test-token".to_string(),
            user: None,
        })
    }

    async fn register_operational(&self, request: &RegisterOperationalRequest) -> Result<Ack> {
        self.record(Call::RegisterOperational(request.email.clone()));
        Ok(Ack::default())
    }
}

pub fn client(id: &str, first_name: &str, region: &str) -> ClientUser {
    ClientUser {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: "Mokoena".to_string(),
        email: format!("{}.{id}@justice.example.org", first_name.to_lowercase()),
        phone: None,
        persal_id: Some(format!("P{id:0>6}")),
        department: Some("Magistrates Court".to_string()),
        region: Some(region.to_string()),
        registration_status: RegistrationStatus::Pending,
        created_at: None,
    }
}

pub fn user(id: &str, first_name: &str, last_name: &str) -> UserSummary {
    UserSummary {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@justice.example.org", first_name.to_lowercase()),
        phone: None,
        user_type: UserType::Client,
        registration_status: Some(RegistrationStatus::Verified),
        role: None,
        persal_id: None,
        department: None,
        region: Some("Gauteng".to_string()),
        created_at: None,
    }
}

pub fn application(id: &str, status: ApplicationStatus) -> Application {
    Application {
        application_id: id.to_string(),
        applicant_id: "7".to_string(),
        applicant_name: Some("Lerato Khumalo".to_string()),
        applicant_email: Some("lerato@justice.example.org".to_string()),
        device_model: Some("Galaxy A15".to_string()),
        plan_name: Some("Data 5GB".to_string()),
        contract_months: Some(24),
        region: Some("Free State".to_string()),
        application_status: status,
        rejection_reason: None,
        created_at: None,
        updated_at: None,
    }
}
