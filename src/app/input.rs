use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::field::FieldOutcome;

use super::App;

impl App {
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => {
                self.field.handle_mouse(mouse);
            }
            Event::Paste(text) => {
                self.field.paste(&text);
            }
            _ => {}
        }
        self.drain_changes();
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if self.field.handle_key(key) != FieldOutcome::Continue {
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => self.should_quit = true,
            (KeyCode::Enter, _) => self.field.focus(),
            _ => {}
        }
    }
}
