use serde::{Deserialize, Serialize};

use super::scroll::ScrollCurve;
use crate::input::InputKind;

/// Mount-time configuration of a code field; changing it requires a new state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeFieldConfig {
    pub max_length: usize,
    pub char_empty_placeholder: char,
    /// When set, every filled cell shows this instead of its char
    pub char_masker: Option<char>,
    pub enabled: bool,
    pub initial_text: String,
    pub input_kind: InputKind,
    pub cell: CellLayout,
    pub scroll_curve: ScrollCurve,
}

impl Default for CodeFieldConfig {
    fn default() -> Self {
        Self {
            max_length: 4,
            char_empty_placeholder: ' ',
            char_masker: None,
            enabled: true,
            initial_text: String::new(),
            input_kind: InputKind::Text,
            cell: CellLayout::default(),
            scroll_curve: ScrollCurve::default(),
        }
    }
}

/// Cell slot size in terminal columns/rows. A slot is the box plus `gap`
/// columns of padding, split around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellLayout {
    pub width: u16,
    pub height: u16,
    pub gap: u16,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self { width: 5, height: 3, gap: 1 }
    }
}

impl CellLayout {
    /// Slot width, also the distance between two neighbouring boxes
    pub fn stride(&self) -> u16 {
        self.width.saturating_add(self.gap)
    }

    pub fn leading_pad(&self) -> u16 {
        self.gap / 2
    }

    pub fn row_width(&self, cells: usize) -> usize {
        cells.saturating_mul(self.stride() as usize)
    }
}
