//! Text components the renderer assembles.
//!
//! Each component returns a `String`; nothing here writes to stdout.
//!
//! - [`header`]: title, active filters, error banner
//! - [`table`]: paged rows and key/value record tables
//! - [`footer`]: page position and counts
//! - [`empty`]: empty-state message
//! - [`dialog`]: status dialog panel

mod dialog;
mod empty;
mod footer;
mod header;
mod table;

pub use dialog::render_dialog;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::{render_banner, render_header};
pub use table::{render_key_values, render_rows};
