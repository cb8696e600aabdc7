//! Input Module
//!
//! Editable text surface, input filters and key routing.

pub mod edit_surface;
pub mod kind;
pub mod mode;

// Re-exports
pub use edit_surface::{handle_code_key, CodeBuffer, EditOutcome, EditSurface, KeyResult};
pub use kind::InputKind;
pub use mode::FieldMode;
