//! Event loop tying [`AppState`], [`handle_event`] and the [`WorkerPool`]
//! together.
//!
//! [`Driver::dispatch`] applies an event and executes the resulting actions;
//! [`Driver::settle`] feeds worker responses back in as events until nothing is
//! in flight. A one-shot CLI command is `dispatch(Mount(..))` followed by
//! `settle()`.

use crate::api::AdminApi;
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::worker::WorkerPool;
use std::sync::Arc;

pub struct Driver<A: ?Sized> {
    state: AppState,
    pool: WorkerPool<A>,
}

impl<A: AdminApi + ?Sized + 'static> Driver<A> {
    #[must_use]
    pub fn new(api: Arc<A>, state: AppState) -> Self {
        Self {
            state,
            pool: WorkerPool::new(api),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of posted requests whose responses have not been consumed.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pool.in_flight()
    }

    /// Applies `event` and executes its actions. Returns whether the view
    /// should be re-rendered.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        let (should_render, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action);
        }
        Ok(should_render)
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::PostToWorker(request) => self.pool.post(request),
            Action::CancelRequests(view) => {
                self.pool.cancel(view);
            }
        }
    }

    /// Waits for one response and applies it. Returns `false` when nothing was
    /// in flight.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn step(&mut self) -> Result<bool> {
        match self.pool.next_response().await {
            Some(response) => {
                self.dispatch(&Event::WorkerResponse(response))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Applies responses until no request is in flight, including reloads
    /// triggered by earlier responses.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn settle(&mut self) -> Result<()> {
        while self.step().await? {}
        Ok(())
    }

    /// `dispatch` followed by `settle`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn run(&mut self, event: &Event) -> Result<bool> {
        let should_render = self.dispatch(event)?;
        self.settle().await?;
        Ok(should_render)
    }
}
