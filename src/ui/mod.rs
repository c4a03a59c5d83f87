//! Text rendering of view state.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → text
//! ```
//!
//! - [`viewmodel`]: display-ready view types and per-entity row layout
//! - [`renderer`]: top-level rendering coordinator
//! - [`components`]: header, table, footer, empty-state and dialog pieces

pub mod components;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{DialogInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo, Tabular, UIViewModel};
