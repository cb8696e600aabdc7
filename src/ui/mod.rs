//! UI Module
//!
//! Terminal user interface using ratatui.

pub mod code_field;
pub mod components;

// Re-exports
pub use code_field::{CellStyles, CodeField};
pub use components::{HelpBar, MessageType, StatusLine};
