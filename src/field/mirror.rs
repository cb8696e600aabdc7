//! Text Mirror
//!
//! Local copy of the surface text, replaced wholesale on every change.

use zeroize::Zeroizing;

use crate::input::EditSurface;

/// Called with the new text and whether it reached `max_length`
pub type TextChangedCallback = Box<dyn FnMut(&str, bool)>;

pub struct TextMirror {
    chars: Zeroizing<Vec<char>>,
    max_length: usize,
    on_text_changed: Option<TextChangedCallback>,
}

impl TextMirror {
    /// Seeds the mirror without notifying
    pub fn new(initial: &str, max_length: usize) -> Self {
        Self {
            chars: Zeroizing::new(initial.chars().collect()),
            max_length,
            on_text_changed: None,
        }
    }

    /// Replace the contents without notifying, for mount-time seeding
    pub fn seed(&mut self, text: &str) {
        *self.chars = text.chars().collect();
    }

    pub fn on_text_changed(&mut self, callback: TextChangedCallback) {
        self.on_text_changed = Some(callback);
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_complete(&self) -> bool {
        self.chars.len() == self.max_length
    }

    /// Change handler for the surface: replace, notify, then pin the caret to the end
    pub fn set_text(&mut self, text: &str, surface: Option<&mut dyn EditSurface>) {
        *self.chars = text.chars().collect();
        let complete = self.is_complete();
        tracing::debug!(len = self.chars.len(), complete, "code text changed");

        if let Some(callback) = self.on_text_changed.as_mut() {
            callback(text, complete);
        }
        if let Some(surface) = surface {
            surface.set_caret(self.chars.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::{CodeBuffer, InputKind};

    fn recording_mirror(max: usize) -> (TextMirror, Rc<RefCell<Vec<(String, bool)>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut mirror = TextMirror::new("", max);
        mirror.on_text_changed(Box::new(move |text, complete| {
            sink.borrow_mut().push((text.to_string(), complete));
        }));
        (mirror, calls)
    }

    #[test]
    fn test_seed_does_not_notify() {
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let mut mirror = TextMirror::new("12", 4);
        mirror.on_text_changed(Box::new(move |_, _| *sink.borrow_mut() += 1));
        assert_eq!(mirror.chars(), &['1', '2']);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_notifies_once_per_change_with_completion() {
        let (mut mirror, calls) = recording_mirror(4);
        for text in ["1", "12", "123", "1234"] {
            mirror.set_text(text, None);
        }
        let expected = vec![
            ("1".to_string(), false),
            ("12".to_string(), false),
            ("123".to_string(), false),
            ("1234".to_string(), true),
        ];
        assert_eq!(*calls.borrow(), expected);
    }

    #[test]
    fn test_deletion_clears_completion() {
        let (mut mirror, calls) = recording_mirror(2);
        mirror.set_text("ab", None);
        mirror.set_text("a", None);
        assert_eq!(calls.borrow().last(), Some(&("a".to_string(), false)));
        assert!(!mirror.is_complete());
    }

    #[test]
    fn test_moves_surface_caret_to_end() {
        let (mut mirror, _) = recording_mirror(4);
        let mut surface = CodeBuffer::new(4, InputKind::Text);
        surface.set_text("abc");
        surface.set_caret(1);

        mirror.set_text("abc", Some(&mut surface));
        assert_eq!(surface.caret(), 3);
    }

    #[test]
    fn test_replaces_rather_than_appends() {
        let (mut mirror, _) = recording_mirror(4);
        mirror.set_text("abcd", None);
        mirror.set_text("xy", None);
        assert_eq!(mirror.chars(), &['x', 'y']);
        assert_eq!(mirror.len(), 2);
    }
}
