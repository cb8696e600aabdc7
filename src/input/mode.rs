//! Field Mode
//!
//! Coarse interaction state of a code field, derived from the surface.

use super::EditSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Enabled, without focus
    Idle,
    /// Focused and accepting keys
    Editing,
    /// Renders content, accepts nothing
    Disabled,
}

impl FieldMode {
    pub fn of<S: EditSurface + ?Sized>(surface: &S) -> Self {
        match (surface.is_enabled(), surface.is_focused()) {
            (false, _) => Self::Disabled,
            (true, true) => Self::Editing,
            (true, false) => Self::Idle,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Editing => "EDIT",
            Self::Disabled => "LOCKED",
        }
    }

    pub fn accepts_keys(&self) -> bool {
        matches!(self, Self::Editing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CodeBuffer, InputKind};

    #[test]
    fn test_mode_transitions() {
        let mut buf = CodeBuffer::new(4, InputKind::Text);
        assert_eq!(FieldMode::of(&buf), FieldMode::Idle);

        buf.request_focus();
        assert_eq!(FieldMode::of(&buf), FieldMode::Editing);

        buf.clear_focus();
        assert_eq!(FieldMode::of(&buf), FieldMode::Idle);

        buf.set_enabled(false);
        assert_eq!(FieldMode::of(&buf), FieldMode::Disabled);
    }

    #[test]
    fn test_accepts_keys() {
        assert!(FieldMode::Editing.accepts_keys());
        assert!(!FieldMode::Idle.accepts_keys());
        assert!(!FieldMode::Disabled.accepts_keys());
    }
}
