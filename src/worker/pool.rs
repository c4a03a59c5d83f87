//! Concurrent execution of worker requests on the tokio runtime.
//!
//! Each posted request runs as its own task. The pool remembers which view
//! every task belongs to so a view's loads can be aborted when it unmounts.
//! Responses of aborted tasks are never returned, even if the task finished
//! before the abort landed. A task that panics still answers, with the
//! request's failure response.

use crate::api::AdminApi;
use crate::app::modes::ViewKind;
use crate::worker::{ApiRequest, ApiResponse, ApiWorker};
use futures_util::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

struct InFlight {
    view: ViewKind,
    cancellable: bool,
    handle: AbortHandle,
}

pub const TASK_PANICKED: &str = "The request failed unexpectedly.";

pub struct WorkerPool<A: ?Sized> {
    worker: Arc<ApiWorker<A>>,
    tx: mpsc::UnboundedSender<(u64, ApiResponse)>,
    rx: mpsc::UnboundedReceiver<(u64, ApiResponse)>,
    pending: HashMap<u64, InFlight>,
    next_id: u64,
}

impl<A: AdminApi + ?Sized + 'static> WorkerPool<A> {
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            worker: Arc::new(ApiWorker::new(api)),
            tx,
            rx,
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    /// Spawns `request` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn post(&mut self, request: ApiRequest) {
        let id = self.next_id;
        self.next_id += 1;

        let view = request.view();
        let cancellable = request.is_cancellable();
        let worker = Arc::clone(&self.worker);
        let tx = self.tx.clone();

        let task = tokio::spawn(async move {
            let failure = request.failed(TASK_PANICKED);
            let response = AssertUnwindSafe(worker.handle_message(request))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    tracing::error!(task_id = id, "worker task panicked");
                    failure
                });
            if tx.send((id, response)).is_err() {
                tracing::debug!(task_id = id, "worker pool dropped before response");
            }
        });

        tracing::debug!(task_id = id, view = %view, cancellable, "request posted");
        self.pending.insert(
            id,
            InFlight {
                view,
                cancellable,
                handle: task.abort_handle(),
            },
        );
    }

    /// Aborts every cancellable task of `view`; returns how many were aborted.
    pub fn cancel(&mut self, view: ViewKind) -> usize {
        let ids: Vec<u64> = self
            .pending
            .iter()
            .filter(|(_, task)| task.view == view && task.cancellable)
            .map(|(id, _)| *id)
            .collect();

        for id in &ids {
            if let Some(task) = self.pending.remove(id) {
                task.handle.abort();
            }
        }
        if !ids.is_empty() {
            tracing::debug!(view = %view, aborted = ids.len(), "in-flight loads cancelled");
        }
        ids.len()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Waits for the next response of a task that was not cancelled.
    ///
    /// Returns `None` once nothing is in flight.
    pub async fn next_response(&mut self) -> Option<ApiResponse> {
        while !self.pending.is_empty() {
            let (id, response) = self.rx.recv().await?;
            if self.pending.remove(&id).is_some() {
                return Some(response);
            }
            tracing::debug!(task_id = id, "dropping response of cancelled task");
        }
        None
    }
}
