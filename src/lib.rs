//! Segmented code input for ratatui.
//!
//! A [`field::CodeFieldState`] mirrors an editable text surface into one cell
//! per character, styles the next cell to fill as a cursor, and scrolls the
//! row so the input boundary stays visible. [`ui::CodeField`] draws it.
//!
//! ```no_run
//! use code_field::field::{CodeFieldConfig, CodeFieldState};
//! use code_field::ui::CodeField;
//!
//! let config = CodeFieldConfig { max_length: 6, char_masker: Some('•'), ..Default::default() };
//! let mut state = CodeFieldState::new(config)
//!     .on_text_changed(|_code, complete| if complete { /* submit */ });
//! state.focus();
//!
//! # let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(40, 5)).unwrap();
//! terminal.draw(|frame| frame.render_stateful_widget(CodeField::new(), frame.area(), &mut state)).unwrap();
//! ```

pub mod app;
pub mod clipboard;
pub mod error;
pub mod field;
pub mod input;
pub mod logging;
pub mod otp;
pub mod ui;

pub use error::{CodeFieldError, Result};
