//! TUI pane rendering modules
//!
//! - [`source`]: Source text with syntax highlighting and the line behind the
//!   selected instruction
//! - [`tac`]: Numbered instruction listing with a cursor
//! - [`status`]: Status bar with keybindings and position

pub mod source;
pub mod status;
pub mod tac;

pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tac::render_tac_pane;
