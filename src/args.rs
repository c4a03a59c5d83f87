use clap::{Args, Parser, Subcommand};
use devicedesk::domain::{ApplicationStatus, OperationalRole, RegistrationStatus, StatisticsKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct DeviceDeskArgs {
    #[clap(subcommand)]
    pub command: Command,

    /// Print log events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Admin API base URL, e.g. https://devices.example.org/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Rows per page in list output
    #[arg(long, global = true)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in operator
    Whoami,
    /// Headline counts and recent registrations
    Dashboard,
    /// User statistics
    Stats {
        /// basic, enhanced or dashboard
        #[arg(default_value = "basic")]
        kind: StatisticsKind,
    },
    /// Every user, client and operational
    Users {
        /// Server-side search; queries shorter than two characters list everyone
        #[arg(short, long)]
        query: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Server-side user search
    Search {
        query: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Client (court staff) registrations
    #[command(subcommand)]
    Clients(ClientAction),
    /// Operational accounts
    #[command(subcommand)]
    Operational(OperationalAction),
    /// Device and contract applications
    #[command(subcommand)]
    Applications(ApplicationAction),
}

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,

    #[arg(long, env = "DEVICEDESK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs").field("email", &self.email).finish_non_exhaustive()
    }
}

/// Client-side filters and paging shared by every list command.
#[derive(Debug, Args, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text match over the visible columns
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    /// client or operational
    #[arg(long = "type")]
    pub user_type: Option<String>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Subcommand)]
pub enum ClientAction {
    List(ListArgs),
    Show {
        id: String,
    },
    /// Verify, reject, suspend or reset a registration
    SetStatus {
        id: String,
        status: RegistrationStatus,
        /// Required when rejecting
        #[arg(long)]
        notes: Option<String>,
    },
    /// Invoice metadata, optionally saving the document
    Invoice {
        id: String,
        /// Save the invoice document to this file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Fetch the inline rendition instead of the attachment
        #[arg(long, requires = "output")]
        inline: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum OperationalAction {
    List(ListArgs),
    Show {
        id: String,
    },
    Create(CreateOperationalArgs),
}

#[derive(Args)]
pub struct CreateOperationalArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    /// Admin, Manager, Support or Technician
    #[arg(long)]
    pub role: OperationalRole,

    #[arg(long, env = "DEVICEDESK_NEW_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl std::fmt::Debug for CreateOperationalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateOperationalArgs")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Subcommand)]
pub enum ApplicationAction {
    List(ListArgs),
    Stats,
    /// Approve, reject or cancel an application
    SetStatus {
        id: String,
        status: ApplicationStatus,
        /// Required when rejecting
        #[arg(long)]
        reason: Option<String>,
    },
}
