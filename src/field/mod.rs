//! Code Field
//!
//! Segmented code input: a mirrored edit surface rendered one cell per char,
//! scrolled so the input boundary stays visible.

pub mod cells;
pub mod config;
pub mod mirror;
pub mod scroll;
pub mod state;

// Re-exports
pub use cells::{render_cells, CellDescriptor, CellStyle};
pub use config::{CellLayout, CodeFieldConfig};
pub use mirror::{TextChangedCallback, TextMirror};
pub use scroll::{ScrollCurve, ViewportScroller};
pub use state::{CodeFieldState, FieldOutcome};
