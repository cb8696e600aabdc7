//! UI Components
//!
//! Widgets the demo places around the code field.

pub mod layout;
pub mod statusline;

// Re-exports
pub use statusline::{HelpBar, MessageType, StatusLine};
