//! Edit Surface
//!
//! The editable text the code field mirrors. The field never edits its cells
//! directly: keystrokes land here, and the field re-reads the text afterwards.

use crossterm::event::{KeyCode, KeyModifiers};
use zeroize::Zeroizing;

use super::InputKind;

/// Change notification returned by every edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Unchanged,
}

impl EditOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Trait for an editable text provider with a length filter, focus and caret
pub trait EditSurface {
    fn text(&self) -> &str;
    /// Programmatic replace; still passes through the input filters
    fn set_text(&mut self, text: &str) -> EditOutcome;
    fn caret(&self) -> usize;
    fn set_caret(&mut self, pos: usize);
    fn max_length(&self) -> usize;
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn is_focused(&self) -> bool;
    /// Returns false when the surface refuses focus (disabled)
    fn request_focus(&mut self) -> bool;
    fn clear_focus(&mut self);
    fn insert_char(&mut self, c: char) -> EditOutcome;
    fn insert_str(&mut self, s: &str) -> EditOutcome;
    fn delete_char(&mut self) -> EditOutcome;
    fn delete_char_forward(&mut self) -> EditOutcome;
    fn clear(&mut self) -> EditOutcome;
    fn clear_to_start(&mut self) -> EditOutcome;
    fn cursor_left(&mut self);
    fn cursor_right(&mut self);
    fn cursor_home(&mut self);
    fn cursor_end(&mut self);

    fn len(&self) -> usize {
        self.text().chars().count()
    }

    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

/// What a key did to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Edited(EditOutcome),
    PasteRequested,
    NotHandled,
}

/// Route a key to the surface, returns [`KeyResult::NotHandled`] for keys it doesn't own
pub fn handle_code_key<S: EditSurface + ?Sized>(surface: &mut S, code: KeyCode, mods: KeyModifiers) -> KeyResult {
    let outcome = match (code, mods) {
        (KeyCode::Backspace, KeyModifiers::CONTROL | KeyModifiers::ALT) => surface.clear_to_start(),
        (KeyCode::Backspace, _) => surface.delete_char(),
        (KeyCode::Delete, _) => surface.delete_char_forward(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => surface.clear(),
        (KeyCode::Char('v'), KeyModifiers::CONTROL) => return KeyResult::PasteRequested,
        (KeyCode::Char('a'), KeyModifiers::CONTROL) | (KeyCode::Home, _) => {
            surface.cursor_home();
            EditOutcome::Unchanged
        }
        (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::End, _) => {
            surface.cursor_end();
            EditOutcome::Unchanged
        }
        (KeyCode::Left, _) => {
            surface.cursor_left();
            EditOutcome::Unchanged
        }
        (KeyCode::Right, _) => {
            surface.cursor_right();
            EditOutcome::Unchanged
        }
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => surface.insert_char(c),
        _ => return KeyResult::NotHandled,
    };
    KeyResult::Edited(outcome)
}

// ============================================================================
// CodeBuffer - length- and kind-filtered buffer with automatic zeroization
// ============================================================================

#[derive(Debug, Clone)]
pub struct CodeBuffer {
    content: Zeroizing<String>,
    caret: usize,
    max_length: usize,
    kind: InputKind,
    enabled: bool,
    focused: bool,
}

impl CodeBuffer {
    pub fn new(max_length: usize, kind: InputKind) -> Self {
        Self {
            content: Zeroizing::new(String::new()),
            caret: 0,
            max_length,
            kind,
            enabled: true,
            focused: false,
        }
    }

    fn room(&self) -> usize {
        self.max_length.saturating_sub(self.len())
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn filtered(&self, s: &str, limit: usize) -> String {
        s.chars().filter(|c| self.kind.accepts(*c)).take(limit).collect()
    }

    fn replace_content(&mut self, new_content: String) -> EditOutcome {
        if *self.content == new_content {
            return EditOutcome::Unchanged;
        }
        *self.content = new_content;
        self.caret = self.caret.min(self.len());
        EditOutcome::Changed
    }
}

impl EditSurface for CodeBuffer {
    fn text(&self) -> &str {
        &self.content
    }

    fn set_text(&mut self, text: &str) -> EditOutcome {
        let filtered = self.filtered(text, self.max_length);
        let outcome = self.replace_content(filtered);
        self.caret = self.len();
        outcome
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_caret(&mut self, pos: usize) {
        self.caret = pos.min(self.len());
    }

    fn max_length(&self) -> usize {
        self.max_length
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.focused = false;
        }
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn request_focus(&mut self) -> bool {
        self.focused = self.enabled;
        self.focused
    }

    fn clear_focus(&mut self) {
        self.focused = false;
    }

    fn insert_char(&mut self, c: char) -> EditOutcome {
        if !self.enabled || self.room() == 0 || !self.kind.accepts(c) {
            return EditOutcome::Unchanged;
        }
        let at = self.byte_index(self.caret);
        self.content.insert(at, c);
        self.caret += 1;
        EditOutcome::Changed
    }

    fn insert_str(&mut self, s: &str) -> EditOutcome {
        if !self.enabled {
            return EditOutcome::Unchanged;
        }
        let accepted = self.filtered(s, self.room());
        if accepted.is_empty() {
            return EditOutcome::Unchanged;
        }
        let at = self.byte_index(self.caret);
        self.content.insert_str(at, &accepted);
        self.caret += accepted.chars().count();
        EditOutcome::Changed
    }

    fn delete_char(&mut self) -> EditOutcome {
        if !self.enabled || self.caret == 0 {
            return EditOutcome::Unchanged;
        }
        self.caret -= 1;
        let at = self.byte_index(self.caret);
        self.content.remove(at);
        EditOutcome::Changed
    }

    fn delete_char_forward(&mut self) -> EditOutcome {
        if !self.enabled || self.caret >= self.len() {
            return EditOutcome::Unchanged;
        }
        let at = self.byte_index(self.caret);
        self.content.remove(at);
        EditOutcome::Changed
    }

    fn clear(&mut self) -> EditOutcome {
        if !self.enabled {
            return EditOutcome::Unchanged;
        }
        self.caret = 0;
        self.replace_content(String::new())
    }

    fn clear_to_start(&mut self) -> EditOutcome {
        if !self.enabled || self.caret == 0 {
            return EditOutcome::Unchanged;
        }
        let at = self.byte_index(self.caret);
        self.content.drain(..at);
        self.caret = 0;
        EditOutcome::Changed
    }

    fn cursor_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        if self.caret < self.len() {
            self.caret += 1;
        }
    }

    fn cursor_home(&mut self) {
        self.caret = 0;
    }

    fn cursor_end(&mut self) {
        self.caret = self.len();
    }
}

// ============================================================================
// Tests
// ============================================================================
