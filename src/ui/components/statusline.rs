//! Status Line Component
//!
//! Displays mode indicator, messages, and input progress.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::input::{FieldMode, InputKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

pub struct StatusLine<'a> {
    mode: FieldMode,
    message: Option<(&'a str, MessageType)>,
    progress: Option<(usize, usize)>,
    input_kind: Option<InputKind>,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: FieldMode) -> Self {
        Self { mode, message: None, progress: None, input_kind: None }
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    pub fn progress(mut self, filled: usize, total: usize) -> Self {
        self.progress = Some((filled, total));
        self
    }

    pub fn input_kind(mut self, kind: InputKind) -> Self {
        self.input_kind = Some(kind);
        self
    }
}

fn mode_style(mode: FieldMode) -> Style {
    let base = Style::default().fg(Color::Black);
    match mode {
        FieldMode::Idle => base.bg(Color::Magenta),
        FieldMode::Editing => base.bg(Color::Blue),
        FieldMode::Disabled => base.bg(Color::Red),
    }
}

fn render_mode_indicator(buf: &mut Buffer, area: Rect, mode: FieldMode) -> u16 {
    let style = mode_style(mode).add_modifier(Modifier::BOLD);
    let mode_text = format!(" {} ", mode.indicator());
    buf.set_string(area.x, area.y, &mode_text, style);
    mode_text.len() as u16
}

fn render_right_section(buf: &mut Buffer, area: Rect, progress: Option<(usize, usize)>, kind: Option<InputKind>) {
    let mut spans: Vec<Span> = Vec::new();
    let sep = Span::styled(" | ", Style::default().fg(Color::White).bg(Color::DarkGray));

    if let Some(kind) = kind {
        spans.push(Span::styled(kind.label(), Style::default().fg(Color::Gray).bg(Color::DarkGray)));
    }

    if let Some((filled, total)) = progress {
        if !spans.is_empty() { spans.push(sep); }
        let color = if filled == total { Color::Green } else { Color::Cyan };
        spans.push(Span::styled(
            filled.to_string(),
            Style::default().fg(color).bg(Color::DarkGray).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled("/", Style::default().fg(Color::White).bg(Color::DarkGray)));
        spans.push(Span::styled(total.to_string(), Style::default().fg(Color::Cyan).bg(Color::DarkGray)));
    }

    let line = Line::from(spans);
    let width = line.width() as u16;
    let x = area.x + area.width.saturating_sub(width + 1);
    buf.set_line(x, area.y, &line, width);
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let mode_width = render_mode_indicator(buf, area, self.mode);
        let x = area.x + mode_width + 1;

        if let Some((msg, msg_type)) = self.message {
            buf.set_string(x, area.y, msg, Style::default().bg(Color::DarkGray).fg(msg_type.color()));
        }

        render_right_section(buf, area, self.progress, self.input_kind);
    }
}

pub struct HelpBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
}

impl HelpBar<'_> {
    pub fn for_mode(mode: FieldMode) -> Self {
        Self { hints: hints_for_mode(mode) }
    }
}

fn hints_for_mode(mode: FieldMode) -> Vec<(&'static str, &'static str)> {
    match mode {
        FieldMode::Editing => vec![
            ("esc", "done"),
            ("bksp", "delete"),
            ("ctrl+u", "clear"),
            ("ctrl+v", "paste"),
        ],
        FieldMode::Idle => vec![
            ("enter/click", "edit"),
            ("q", "quit"),
        ],
        FieldMode::Disabled => vec![
            ("q", "quit"),
        ],
    }
}

fn build_hint_spans<'a>(hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    spans
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans = build_hint_spans(&self.hints);
        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
