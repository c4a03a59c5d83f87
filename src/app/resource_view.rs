//! Load state of a view showing a single server-computed record
//! (dashboard summary, statistics, application stats).

use crate::app::modes::{LoadState, RequestTicket, ViewKind};

#[derive(Debug, Clone)]
pub struct ResourceView<T> {
    kind: ViewKind,
    data: Option<T>,
    load_state: LoadState,
    error: Option<String>,
    generation: u64,
    mounted: bool,
}

impl<T> ResourceView<T> {
    #[must_use]
    pub const fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            data: None,
            load_state: LoadState::Idle,
            error: None,
            generation: 0,
            mounted: false,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ViewKind {
        self.kind
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub const fn load_state(&self) -> LoadState {
        self.load_state
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self) -> RequestTicket {
        self.mounted = true;
        self.begin_load()
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
        if self.load_state == LoadState::Loading {
            self.load_state = LoadState::Idle;
        }
    }

    pub fn begin_load(&mut self) -> RequestTicket {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        RequestTicket {
            view: self.kind,
            generation: self.generation,
        }
    }

    /// Same acceptance rules as a list view: stale or unmounted responses are
    /// dropped and a failure keeps the previous record.
    pub fn apply_loaded(&mut self, ticket: RequestTicket, result: Result<T, String>) -> bool {
        if !self.mounted || ticket.view != self.kind || ticket.generation != self.generation {
            tracing::debug!(view = %self.kind, generation = ticket.generation, "discarding stale load response");
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.load_state = LoadState::Loaded;
                self.error = None;
            }
            Err(message) => {
                self.load_state = LoadState::Error;
                self.error = Some(message);
            }
        }
        true
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplicationStats;

    #[test]
    fn failure_keeps_previous_record() {
        let mut view = ResourceView::new(ViewKind::ApplicationStats);
        let ticket = view.mount();
        let stats = ApplicationStats {
            total: 4,
            pending: 1,
            approved: 2,
            rejected: 1,
            cancelled: 0,
        };
        assert!(view.apply_loaded(ticket, Ok(stats.clone())));

        let ticket = view.begin_load();
        assert!(view.apply_loaded(ticket, Err("boom".to_string())));
        assert_eq!(view.data(), Some(&stats));
        assert_eq!(view.load_state(), LoadState::Error);
    }

    #[test]
    fn late_response_after_unmount_is_dropped() {
        let mut view = ResourceView::<ApplicationStats>::new(ViewKind::ApplicationStats);
        let ticket = view.mount();
        view.unmount();
        assert!(!view.apply_loaded(ticket, Ok(ApplicationStats::default())));
        assert!(view.data().is_none());
    }
}
