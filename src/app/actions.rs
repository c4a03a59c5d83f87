//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) never performs I/O; it returns
//! actions and the driver executes them in order.

use crate::app::modes::ViewKind;
use crate::worker::ApiRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Runs a request on the API worker.
    PostToWorker(ApiRequest),

    /// Aborts the view's in-flight loads. Their responses are never delivered.
    CancelRequests(ViewKind),
}
