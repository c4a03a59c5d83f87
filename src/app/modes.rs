//! View identity and load-state types.
//!
//! Every view runs the same state machine:
//!
//! ```text
//! [Idle] --mount/refresh--> [Loading] --success--> [Loaded]
//! [Loading] --failure--> [Error]
//! [Loaded] --filter change--> [Loaded]   (synchronous, no network)
//! [Loaded] --mutate success--> [Loading] (reload)
//! [Error] --retry--> [Loading]
//! ```

use strum::{Display, EnumString};

/// Identifies one view of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ViewKind {
    ClientUsers,
    OperationalUsers,
    AllUsers,
    Search,
    Applications,
    Dashboard,
    Statistics,
    ApplicationStats,
}

impl ViewKind {
    /// Whether the view accepts a server-side search submit.
    #[must_use]
    pub const fn supports_server_search(self) -> bool {
        matches!(self, Self::AllUsers | Self::Search)
    }

    /// Whether rows of this view can be opened in a status dialog.
    #[must_use]
    pub const fn supports_status_update(self) -> bool {
        matches!(self, Self::ClientUsers | Self::Applications)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ClientUsers => "Client Users",
            Self::OperationalUsers => "Operational Users",
            Self::AllUsers => "All Users",
            Self::Search => "Search",
            Self::Applications => "Applications",
            Self::Dashboard => "Dashboard",
            Self::Statistics => "Statistics",
            Self::ApplicationStats => "Application Statistics",
        }
    }
}

/// Position of a view in the load state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// What the view's loader reads from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadSource {
    /// The view's unfiltered list endpoint.
    #[default]
    All,
    /// The server-side search endpoint with this query.
    Search(String),
}

/// Identifies one issued load so late responses can be recognised.
///
/// A view only applies the response whose generation equals the latest one it
/// issued; anything older, or anything arriving after unmount, is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub view: ViewKind,
    pub generation: u64,
}
