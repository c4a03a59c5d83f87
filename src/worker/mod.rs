//! Background execution of admin API calls.
//!
//! Views never await the network. They post [`ApiRequest`]s; the
//! [`WorkerPool`] runs each one as a tokio task through [`ApiWorker`] and hands
//! the [`ApiResponse`] back to the event loop.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: request execution against an [`AdminApi`](crate::api::AdminApi)
//! - `pool`: task spawning, per-view cancellation and response collection

pub mod handler;
pub mod messages;
pub mod pool;

pub use handler::ApiWorker;
pub use messages::{ApiRequest, ApiResponse, TraceContext};
pub use pool::WorkerPool;
