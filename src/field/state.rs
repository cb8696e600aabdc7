//! Code Field State
//!
//! Everything a mounted code field owns: the edit surface, the mirrored text,
//! the scroller and the geometry of the last render.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use zeroize::Zeroizing;

use super::cells::{render_cells, CellDescriptor};
use super::config::CodeFieldConfig;
use super::mirror::TextMirror;
use super::scroll::{is_fully_visible, measure_row, CellRect, RowMeasure, ViewportScroller};
use crate::clipboard;
use crate::input::{handle_code_key, CodeBuffer, EditOutcome, EditSurface, FieldMode, KeyResult};

/// Result of feeding an event to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The text changed
    Changed,
    /// Consumed without a text change
    Unchanged,
    /// Not for this field
    Continue,
}

impl From<EditOutcome> for FieldOutcome {
    fn from(outcome: EditOutcome) -> Self {
        match outcome {
            EditOutcome::Changed => Self::Changed,
            EditOutcome::Unchanged => Self::Unchanged,
        }
    }
}

pub struct CodeFieldState {
    config: CodeFieldConfig,
    surface: Option<Box<dyn EditSurface>>,
    mirror: TextMirror,
    pub scroller: ViewportScroller,
    /// Inner area of the last render, used for hit testing
    pub area: Rect,
    screen_cursor: Option<Position>,
}

impl CodeFieldState {
    pub fn new(config: CodeFieldConfig) -> Self {
        let buffer = CodeBuffer::new(config.max_length, config.input_kind);
        Self::with_surface(config, Box::new(buffer))
    }

    pub fn with_surface(config: CodeFieldConfig, surface: Box<dyn EditSurface>) -> Self {
        let mut state = Self::detached(config);
        state.attach(surface);
        state
    }

    /// A field with no surface yet: renders its seed, ignores input
    pub fn detached(config: CodeFieldConfig) -> Self {
        let mirror = TextMirror::new(&config.initial_text, config.max_length);
        let scroller = ViewportScroller::new(config.scroll_curve);
        Self {
            config,
            surface: None,
            mirror,
            scroller,
            area: Rect::default(),
            screen_cursor: None,
        }
    }

    /// Wire a surface, seeding it (and the mirror, without notifying) from `initial_text`
    pub fn attach(&mut self, mut surface: Box<dyn EditSurface>) {
        surface.set_enabled(self.config.enabled);
        surface.set_text(&self.config.initial_text);
        self.mirror.seed(surface.text());
        self.surface = Some(surface);
    }

    pub fn on_text_changed(mut self, callback: impl FnMut(&str, bool) + 'static) -> Self {
        self.mirror.on_text_changed(Box::new(callback));
        self
    }

    pub fn config(&self) -> &CodeFieldConfig {
        &self.config
    }

    pub fn chars(&self) -> &[char] {
        self.mirror.chars()
    }

    pub fn is_complete(&self) -> bool {
        self.mirror.is_complete()
    }

    pub fn is_focused(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.is_focused())
    }

    pub fn caret(&self) -> Option<usize> {
        self.surface.as_ref().map(|s| s.caret())
    }

    pub fn mode(&self) -> FieldMode {
        match self.surface.as_ref() {
            Some(surface) => FieldMode::of(&**surface),
            None if self.config.enabled => FieldMode::Idle,
            None => FieldMode::Disabled,
        }
    }

    pub fn cells(&self) -> Vec<CellDescriptor> {
        render_cells(
            self.mirror.chars(),
            self.config.max_length,
            self.config.char_empty_placeholder,
            self.config.char_masker,
            self.is_focused(),
        )
    }

    /// Terminal cursor position inside the current cell, when it is on screen
    pub fn screen_cursor(&self) -> Option<Position> {
        self.screen_cursor
    }

    /// Click-to-focus: focus the surface with the caret after the last char
    pub fn focus(&mut self) {
        if !self.config.enabled {
            return;
        }
        let Some(surface) = self.surface.as_mut() else { return };
        if surface.request_focus() {
            let end = surface.len();
            surface.set_caret(end);
            tracing::debug!(caret = end, "code field focused");
        }
    }

    pub fn blur(&mut self) {
        let Some(surface) = self.surface.as_mut() else { return };
        if surface.is_focused() {
            surface.clear_focus();
            tracing::debug!("code field blurred");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FieldOutcome {
        if key.kind != KeyEventKind::Press || !self.mode().accepts_keys() {
            return FieldOutcome::Continue;
        }
        if key.code == KeyCode::Esc {
            self.blur();
            return FieldOutcome::Unchanged;
        }
        let Some(surface) = self.surface.as_mut() else { return FieldOutcome::Continue };

        match handle_code_key(&mut **surface, key.code, key.modifiers) {
            KeyResult::Edited(outcome) => self.sync(outcome),
            KeyResult::PasteRequested => self.paste_from_clipboard(),
            KeyResult::NotHandled => FieldOutcome::Continue,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> FieldOutcome {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return FieldOutcome::Continue;
        }
        if self.area.contains(Position::new(event.column, event.row)) {
            if !self.config.enabled {
                return FieldOutcome::Continue;
            }
            self.focus();
            return FieldOutcome::Unchanged;
        }
        self.blur();
        FieldOutcome::Continue
    }

    /// Insert pasted text at the caret; the surface filters and truncates it
    pub fn paste(&mut self, text: &str) -> FieldOutcome {
        if !self.mode().accepts_keys() {
            return FieldOutcome::Continue;
        }
        let Some(surface) = self.surface.as_mut() else { return FieldOutcome::Continue };
        let outcome = surface.insert_str(text);
        self.sync(outcome)
    }

    fn paste_from_clipboard(&mut self) -> FieldOutcome {
        match clipboard::read_text() {
            Ok(text) => self.paste(&Zeroizing::new(text)),
            Err(e) => {
                tracing::warn!(error = %e, "paste ignored");
                FieldOutcome::Unchanged
            }
        }
    }

    fn sync(&mut self, outcome: EditOutcome) -> FieldOutcome {
        if outcome.is_changed() {
            if let Some(surface) = self.surface.as_mut() {
                let text = Zeroizing::new(surface.text().to_string());
                self.mirror.set_text(&text, Some(&mut **surface));
            }
        }
        outcome.into()
    }

    /// Advance the scroll animation; true when a redraw is needed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.scroller.tick(now)
    }

    /// Measure the row for `area` at the current scroll offset
    pub fn measure(&mut self, area: Rect) -> RowMeasure {
        self.area = area;
        let row = measure_row(self.config.max_length, self.config.cell, area, self.scroller.offset());
        self.scroller.set_max_offset(row.max_offset);
        row
    }

    /// Post-layout hook: bring the boundary cells into `viewport`
    pub fn layout_pass(&mut self, row: &RowMeasure, viewport: Rect, now: Instant) {
        let len = self.mirror.len();
        self.scroller.layout_pass(&row.cells, len, viewport, now);
        self.screen_cursor = self.cursor_in(row, viewport);
    }

    fn cursor_in(&self, row: &RowMeasure, viewport: Rect) -> Option<Position> {
        if !self.is_focused() {
            return None;
        }
        let cell = row.cells.get(self.mirror.len())?;
        let layout = self.config.cell;
        let cell_box = CellRect {
            x: cell.screen.x + layout.leading_pad() as i32,
            width: layout.width,
            ..cell.screen
        };
        if !is_fully_visible(cell_box, viewport) {
            return None;
        }
        let x = cell_box.x + layout.width as i32 / 2;
        let y = cell_box.y + layout.height as i32 / 2;
        Some(Position::new(x as u16, y as u16))
    }
}
