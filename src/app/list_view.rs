//! Generic fetch/filter/paginate state of one list view.
//!
//! [`ListView`] is instantiated once per list (client users, operational users,
//! all users, search, applications). It owns the most recently loaded raw
//! collection, the view's filter parameters and paginator, and the load state
//! machine. The derived view and the visible page are computed on demand from
//! those inputs and never stored.
//!
//! Handlers that do not care about the entity type drive views through the
//! object-safe [`ListControl`] trait.

use crate::app::filter::{filter_items, FilterParams, Filterable};
use crate::app::modes::{LoadSource, LoadState, RequestTicket, ViewKind};
use crate::app::pagination::Paginator;

#[derive(Debug, Clone)]
pub struct ListView<T> {
    kind: ViewKind,
    raw: Option<Vec<T>>,
    filter: FilterParams,
    paginator: Paginator,
    load_state: LoadState,
    error: Option<String>,
    source: LoadSource,
    generation: u64,
    mounted: bool,
}

impl<T: Filterable> ListView<T> {
    #[must_use]
    pub fn new(kind: ViewKind, page_size: usize) -> Self {
        Self {
            kind,
            raw: None,
            filter: FilterParams::default(),
            paginator: Paginator::new(page_size),
            load_state: LoadState::Idle,
            error: None,
            source: LoadSource::All,
            generation: 0,
            mounted: false,
        }
    }

    /// The raw collection from the latest applied load, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&[T]> {
        self.raw.as_deref()
    }

    /// Entries matching the current filter, in raw order.
    #[must_use]
    pub fn derived(&self) -> Vec<&T> {
        self.raw
            .as_deref()
            .map(|raw| filter_items(raw, &self.filter))
            .unwrap_or_default()
    }

    /// The visible page of the derived view.
    #[must_use]
    pub fn page(&self) -> Vec<&T> {
        let derived = self.derived();
        self.paginator.slice(&derived).to_vec()
    }

    /// Looks a row up by key in the raw collection.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&T> {
        self.raw.as_deref()?.iter().find(|item| item.key() == key)
    }

    /// Applies the response to a load.
    ///
    /// Returns `false` and leaves the view untouched if the ticket is stale or
    /// the view is unmounted. On failure the previous raw collection is kept
    /// and the message becomes the error banner.
    pub fn apply_loaded(&mut self, ticket: RequestTicket, result: Result<Vec<T>, String>) -> bool {
        if !self.accepts(ticket) {
            tracing::debug!(
                view = %self.kind,
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                mounted = self.mounted,
                "discarding stale load response"
            );
            return false;
        }

        match result {
            Ok(items) => {
                tracing::debug!(view = %self.kind, count = items.len(), "list loaded");
                self.raw = Some(items);
                self.load_state = LoadState::Loaded;
                self.error = None;
                let total = self.derived().len();
                self.paginator.revalidate(total);
            }
            Err(message) => {
                tracing::debug!(view = %self.kind, error = %message, "list load failed");
                self.load_state = LoadState::Error;
                self.error = Some(message);
            }
        }
        true
    }

    fn accepts(&self, ticket: RequestTicket) -> bool {
        self.mounted && ticket.view == self.kind && ticket.generation == self.generation
    }
}

/// Type-erased operations on a list view.
pub trait ListControl {
    fn kind(&self) -> ViewKind;
    fn load_state(&self) -> LoadState;
    fn error(&self) -> Option<&str>;
    fn filter(&self) -> &FilterParams;
    fn paginator(&self) -> &Paginator;
    fn source(&self) -> &LoadSource;
    fn is_mounted(&self) -> bool;
    fn contains(&self, key: &str) -> bool;
    fn derived_len(&self) -> usize;

    /// Marks the view mounted and starts its first load.
    fn mount(&mut self) -> RequestTicket;

    /// Marks the view unmounted; responses to anything issued so far are
    /// discarded.
    fn unmount(&mut self);

    /// Starts a load and returns its ticket. The previous ticket becomes stale.
    fn begin_load(&mut self) -> RequestTicket;

    fn set_source(&mut self, source: LoadSource);

    /// Applies a failed load; same acceptance rules as a successful one.
    fn apply_failed(&mut self, ticket: RequestTicket, message: String) -> bool;

    // Filter setters return whether anything changed; a change always resets
    // the page index to 0.
    fn set_search_term(&mut self, term: &str) -> bool;
    fn set_status(&mut self, status: Option<String>) -> bool;
    fn set_region(&mut self, region: Option<String>) -> bool;
    fn set_user_type(&mut self, user_type: Option<String>) -> bool;
    fn clear_filters(&mut self) -> bool;

    fn next_page(&mut self) -> bool;
    fn previous_page(&mut self) -> bool;
    fn go_to_page(&mut self, page_index: usize);
    fn set_page_size(&mut self, page_size: usize);

    fn set_error(&mut self, message: String);
    fn dismiss_error(&mut self) -> bool;
}

impl<T: Filterable> ListView<T> {
    fn update_filter(&mut self, update: impl FnOnce(&mut FilterParams)) -> bool {
        let before = self.filter.clone();
        update(&mut self.filter);
        let changed = before != self.filter;
        if changed {
            self.paginator.reset();
        }
        changed
    }
}

fn normalize_category(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl<T: Filterable> ListControl for ListView<T> {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn load_state(&self) -> LoadState {
        self.load_state
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn filter(&self) -> &FilterParams {
        &self.filter
    }

    fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    fn source(&self) -> &LoadSource {
        &self.source
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    fn derived_len(&self) -> usize {
        self.derived().len()
    }

    fn mount(&mut self) -> RequestTicket {
        self.mounted = true;
        self.begin_load()
    }

    fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
        if self.load_state == LoadState::Loading {
            self.load_state = LoadState::Idle;
        }
    }

    fn begin_load(&mut self) -> RequestTicket {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        RequestTicket {
            view: self.kind,
            generation: self.generation,
        }
    }

    fn set_source(&mut self, source: LoadSource) {
        self.source = source;
    }

    fn apply_failed(&mut self, ticket: RequestTicket, message: String) -> bool {
        self.apply_loaded(ticket, Err(message))
    }

    fn set_search_term(&mut self, term: &str) -> bool {
        self.update_filter(|f| f.search_term = term.to_string())
    }

    fn set_status(&mut self, status: Option<String>) -> bool {
        self.update_filter(|f| f.status = normalize_category(status))
    }

    fn set_region(&mut self, region: Option<String>) -> bool {
        self.update_filter(|f| f.region = normalize_category(region))
    }

    fn set_user_type(&mut self, user_type: Option<String>) -> bool {
        self.update_filter(|f| f.user_type = normalize_category(user_type))
    }

    fn clear_filters(&mut self) -> bool {
        self.update_filter(|f| *f = FilterParams::default())
    }

    fn next_page(&mut self) -> bool {
        let total = self.derived_len();
        self.paginator.next(total)
    }

    fn previous_page(&mut self) -> bool {
        self.paginator.previous()
    }

    fn go_to_page(&mut self, page_index: usize) {
        let total = self.derived_len();
        self.paginator.go_to(page_index, total);
    }

    fn set_page_size(&mut self, page_size: usize) {
        self.paginator.set_page_size(page_size);
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}
