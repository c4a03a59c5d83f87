//! Application state and view model computation.
//!
//! [`AppState`] owns one state record per view. Each list view keeps its own
//! raw collection, filters and paginator, so switching views never leaks
//! filters from one list into another. The derived view and the visible page
//! are recomputed from that state on demand; nothing derived is cached.
//!
//! At most one status dialog is open at a time, and it targets a row of a
//! specific view.

use crate::app::dialog::StatusDialog;
use crate::app::filter::Filterable;
use crate::app::list_view::{ListControl, ListView};
use crate::app::modes::{LoadState, ViewKind};
use crate::app::resource_view::ResourceView;
use crate::domain::{
    Application, ApplicationStats, ClientUser, DashboardSummary, OperationalUser, StatisticsKind,
    StatisticsSnapshot, UserSummary,
};
use crate::ui::viewmodel::{DialogInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo, Tabular, UIViewModel};

#[derive(Debug, Clone)]
pub struct AppState {
    pub client_users: ListView<ClientUser>,
    pub operational_users: ListView<OperationalUser>,
    pub all_users: ListView<UserSummary>,
    pub search: ListView<UserSummary>,
    pub applications: ListView<Application>,

    pub dashboard: ResourceView<DashboardSummary>,
    pub statistics: ResourceView<StatisticsSnapshot>,
    pub application_stats: ResourceView<ApplicationStats>,

    /// Which statistics endpoint the statistics view loads from.
    pub statistics_kind: StatisticsKind,

    /// Raw text of the server-search input of the all-users and search views.
    pub search_input: String,

    pub dialog: Option<StatusDialog>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::app::pagination::DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            client_users: ListView::new(ViewKind::ClientUsers, page_size),
            operational_users: ListView::new(ViewKind::OperationalUsers, page_size),
            all_users: ListView::new(ViewKind::AllUsers, page_size),
            search: ListView::new(ViewKind::Search, page_size),
            applications: ListView::new(ViewKind::Applications, page_size),
            dashboard: ResourceView::new(ViewKind::Dashboard),
            statistics: ResourceView::new(ViewKind::Statistics),
            application_stats: ResourceView::new(ViewKind::ApplicationStats),
            statistics_kind: StatisticsKind::default(),
            search_input: String::new(),
            dialog: None,
        }
    }

    /// Type-erased access to a list view; `None` for single-record views.
    pub fn list_mut(&mut self, view: ViewKind) -> Option<&mut dyn ListControl> {
        match view {
            ViewKind::ClientUsers => Some(&mut self.client_users),
            ViewKind::OperationalUsers => Some(&mut self.operational_users),
            ViewKind::AllUsers => Some(&mut self.all_users),
            ViewKind::Search => Some(&mut self.search),
            ViewKind::Applications => Some(&mut self.applications),
            ViewKind::Dashboard | ViewKind::Statistics | ViewKind::ApplicationStats => None,
        }
    }

    #[must_use]
    pub fn list(&self, view: ViewKind) -> Option<&dyn ListControl> {
        match view {
            ViewKind::ClientUsers => Some(&self.client_users),
            ViewKind::OperationalUsers => Some(&self.operational_users),
            ViewKind::AllUsers => Some(&self.all_users),
            ViewKind::Search => Some(&self.search),
            ViewKind::Applications => Some(&self.applications),
            ViewKind::Dashboard | ViewKind::Statistics | ViewKind::ApplicationStats => None,
        }
    }

    /// Load state of any view.
    #[must_use]
    pub fn load_state(&self, view: ViewKind) -> LoadState {
        match view {
            ViewKind::Dashboard => self.dashboard.load_state(),
            ViewKind::Statistics => self.statistics.load_state(),
            ViewKind::ApplicationStats => self.application_stats.load_state(),
            list => self.list(list).map_or(LoadState::Idle, ListControl::load_state),
        }
    }

    /// Error banner of any view.
    #[must_use]
    pub fn error(&self, view: ViewKind) -> Option<&str> {
        match view {
            ViewKind::Dashboard => self.dashboard.error(),
            ViewKind::Statistics => self.statistics.error(),
            ViewKind::ApplicationStats => self.application_stats.error(),
            list => self.list(list).and_then(ListControl::error),
        }
    }

    /// Builds the renderable model of a list view.
    ///
    /// Returns `None` for single-record views; those are rendered straight from
    /// their record.
    #[must_use]
    pub fn compute_viewmodel(&self, view: ViewKind) -> Option<UIViewModel> {
        let vm = match view {
            ViewKind::ClientUsers => self.list_viewmodel(&self.client_users),
            ViewKind::OperationalUsers => self.list_viewmodel(&self.operational_users),
            ViewKind::AllUsers => self.list_viewmodel(&self.all_users),
            ViewKind::Search => self.list_viewmodel(&self.search),
            ViewKind::Applications => self.list_viewmodel(&self.applications),
            ViewKind::Dashboard | ViewKind::Statistics | ViewKind::ApplicationStats => return None,
        };
        Some(vm)
    }

    fn list_viewmodel<T: Filterable + Tabular>(&self, list: &ListView<T>) -> UIViewModel {
        let derived = list.derived();
        let paginator = list.paginator();
        let rows = paginator
            .slice(&derived)
            .iter()
            .map(|item| DisplayRow {
                key: item.key().to_string(),
                cells: item.cells(),
            })
            .collect::<Vec<_>>();

        let loaded_count = list.raw().map_or(0, <[T]>::len);
        let empty_state = Self::compute_empty_state(list, rows.is_empty(), loaded_count);

        UIViewModel {
            header: Self::compute_header(list),
            columns: T::columns(),
            rows,
            footer: FooterInfo {
                page_number: paginator.page_index() + 1,
                page_count: paginator.page_count(derived.len()),
                filtered_count: derived.len(),
                loaded_count,
            },
            banner: list.error().map(ToString::to_string),
            empty_state,
            dialog: self
                .dialog
                .as_ref()
                .filter(|d| d.view == list.kind())
                .map(|d| DialogInfo {
                    target_id: d.target_id.clone(),
                    error: d.error.clone(),
                    submitting: d.submitting,
                }),
            loading: list.load_state() == LoadState::Loading,
        }
    }

    fn compute_header<T: Filterable>(list: &ListView<T>) -> HeaderInfo {
        let filter = list.filter();
        let mut parts = Vec::new();
        let term = filter.search_term.trim();
        if !term.is_empty() {
            parts.push(format!("search \"{term}\""));
        }
        if let Some(status) = &filter.status {
            parts.push(format!("status={status}"));
        }
        if let Some(region) = &filter.region {
            parts.push(format!("region={region}"));
        }
        if let Some(user_type) = &filter.user_type {
            parts.push(format!("type={user_type}"));
        }
        if let crate::app::modes::LoadSource::Search(query) = list.source() {
            parts.push(format!("server query \"{query}\""));
        }

        HeaderInfo {
            title: list.kind().title().to_string(),
            filters: (!parts.is_empty()).then(|| parts.join(", ")),
        }
    }

    fn compute_empty_state<T: Filterable>(
        list: &ListView<T>,
        page_empty: bool,
        loaded_count: usize,
    ) -> Option<EmptyState> {
        if !page_empty {
            return None;
        }
        let (message, subtitle) = match list.load_state() {
            LoadState::Idle | LoadState::Loading if list.raw().is_none() => ("Loading...", ""),
            LoadState::Error if list.raw().is_none() => ("Nothing to show", "The last load failed"),
            _ if loaded_count == 0 => ("No records found", "The server returned an empty list"),
            _ => ("No matches", "Try clearing or relaxing the filters"),
        };
        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }
}
