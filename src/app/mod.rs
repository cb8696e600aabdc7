//! Demo Application State
//!
//! A single code field on screen, reporting completed codes in the status line.

mod config;
mod input;

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Layout},
    style::Color,
    Frame,
};
use zeroize::Zeroizing;

use crate::error::Result;
use crate::field::CodeFieldState;
use crate::input::{FieldMode, InputKind};
use crate::otp::TotpVerifier;
use crate::ui::components::layout::{centered_rect_fixed, create_popup_block, field_width};
use crate::ui::{CodeField, HelpBar, MessageType, StatusLine};

pub use config::AppConfig;

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

struct TextChange {
    code: Zeroizing<String>,
    complete: bool,
}

pub struct App {
    pub config: AppConfig,
    pub field: CodeFieldState,
    pub message: Option<(String, MessageType, Instant)>,
    pub should_quit: bool,
    verifier: Option<TotpVerifier>,
    changes: Receiver<TextChange>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let verifier = config
            .totp_secret
            .as_deref()
            .map(TotpVerifier::from_user_input)
            .transpose()?;

        let mut field_config = config.field.clone();
        if let Some(verifier) = &verifier {
            field_config.max_length = verifier.digits();
            field_config.input_kind = InputKind::Numeric;
        }

        let (tx, changes) = mpsc::channel();
        let mut field = CodeFieldState::new(field_config).on_text_changed(move |text, complete| {
            let _ = tx.send(TextChange { code: Zeroizing::new(text.to_string()), complete });
        });
        field.focus();

        Ok(Self {
            config,
            field,
            message: None,
            should_quit: false,
            verifier,
            changes,
        })
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.check_message_expiry();

        let [main, status, help] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)]).areas(frame.area());

        let field_config = self.field.config();
        let width = field_width(field_config.max_length, field_config.cell.stride(), 2);
        let popup = centered_rect_fixed(width, field_config.cell.height + 2, main);
        let kind = field_config.input_kind;
        let max_length = field_config.max_length;

        let mode = self.field.mode();
        let color = match mode {
            FieldMode::Editing => Color::Magenta,
            FieldMode::Idle => Color::DarkGray,
            FieldMode::Disabled => Color::Red,
        };
        let widget = CodeField::new().block(create_popup_block(" Enter code ", color));
        frame.render_stateful_widget(widget, popup, &mut self.field);
        if let Some(position) = self.field.screen_cursor() {
            frame.set_cursor_position(position);
        }

        let mut status_line = StatusLine::new(mode)
            .progress(self.field.chars().len(), max_length)
            .input_kind(kind);
        if let Some((msg, msg_type, _)) = &self.message {
            status_line = status_line.message(msg, *msg_type);
        }
        frame.render_widget(status_line, status);
        frame.render_widget(HelpBar::for_mode(mode), help);
    }

    pub fn is_animating(&self) -> bool {
        self.field.scroller.is_animating()
    }

    /// Advance time-driven state; true when a redraw is needed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.field.tick(now)
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
    }

    fn check_message_expiry(&mut self) {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, time)| time.elapsed() > MESSAGE_TIMEOUT);

        if expired {
            self.message = None;
        }
    }

    fn drain_changes(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            if change.complete {
                self.on_complete(&change.code);
            } else {
                self.message = None;
            }
        }
    }

    fn on_complete(&mut self, code: &str) {
        tracing::info!(len = code.chars().count(), "code completed");
        self.field.blur();

        let Some(verifier) = &self.verifier else {
            match self.field.config().char_masker {
                Some(_) => self.set_message("Code entered", MessageType::Success),
                None => self.set_message(&format!("Code entered: {}", code), MessageType::Success),
            }
            return;
        };

        match verifier.verify(code) {
            Ok(true) => self.set_message("Code accepted", MessageType::Success),
            Ok(false) => {
                let msg = format!("Code rejected, next code in {}s", verifier.seconds_remaining());
                self.set_message(&msg, MessageType::Error);
            }
            Err(e) => self.set_message(&e.to_string(), MessageType::Error),
        }
    }
}
