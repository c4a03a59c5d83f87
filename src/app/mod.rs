//! View-state orchestration: fetch, filter, paginate, mutate, reload.
//!
//! # Architecture
//!
//! ```text
//! Input → Event → handle_event → AppState mutation → Actions → API worker
//!                      ↑                                          ↓
//!                      └────────────── ApiResponse ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`filter`]: pure derived-view filtering
//! - [`pagination`]: page slicing over the derived view
//! - [`list_view`]: per-view fetch/filter/paginate state
//! - [`resource_view`]: per-view state for single server-computed records
//! - [`dialog`]: status-change dialog
//! - [`modes`]: view identity, load states and request tickets
//! - [`state`]: all view states plus view model computation
//! - [`handler`]: event processing
//! - [`actions`]: side effects emitted by the handler

pub mod actions;
pub mod dialog;
pub mod filter;
pub mod handler;
pub mod list_view;
pub mod modes;
pub mod pagination;
pub mod resource_view;
pub mod state;

pub use actions::Action;
pub use dialog::{StatusChoice, StatusDialog};
pub use filter::{filter_items, FilterParams, Filterable};
pub use handler::{handle_event, Event, MIN_SEARCH_LEN};
pub use list_view::{ListControl, ListView};
pub use modes::{LoadSource, LoadState, RequestTicket, ViewKind};
pub use pagination::{Paginator, DEFAULT_PAGE_SIZE};
pub use resource_view::ResourceView;
pub use state::AppState;
