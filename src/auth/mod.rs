//! Authentication collaborators: the shared token and its persistence.
//!
//! - `context`: [`AuthContext`], the single-writer token handle read by the HTTP client
//! - `store`: [`SessionStore`] trait and the JSON file implementation

pub mod context;
pub mod store;

pub use context::AuthContext;
pub use store::{JsonSessionStore, SessionStore};
