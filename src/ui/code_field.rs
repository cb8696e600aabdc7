//! Code field widget

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, StatefulWidget, Widget},
};

use crate::field::{CellDescriptor, CellStyle, CodeFieldState};
use crate::input::FieldMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyles {
    /// Border of every cell
    pub default: Style,
    /// Border of the next cell to fill, falls back to `default`
    pub current: Option<Style>,
    pub text: Style,
}

impl Default for CellStyles {
    fn default() -> Self {
        Self {
            default: Style::default().fg(Color::Cyan),
            current: Some(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            text: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Default)]
pub struct CodeField<'a> {
    block: Option<Block<'a>>,
    styles: CellStyles,
}

impl<'a> CodeField<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn styles(mut self, styles: CellStyles) -> Self {
        self.styles = styles;
        self
    }

    fn cell_styles(&self, style: CellStyle, disabled: bool) -> (Style, Style) {
        let (border, text) = match (style, self.styles.current) {
            (CellStyle::Current, Some(current)) => (current, self.styles.text.add_modifier(Modifier::UNDERLINED)),
            _ => (self.styles.default, self.styles.text),
        };
        if disabled {
            return (border.add_modifier(Modifier::DIM), text.add_modifier(Modifier::DIM));
        }
        (border, text)
    }
}

impl StatefulWidget for CodeField<'_> {
    type State = CodeFieldState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        let row = state.measure(inner);
        let layout = state.config().cell;
        let disabled = state.mode() == FieldMode::Disabled;

        // Draw the visible window plus one slot either side off-screen, so
        // boxes cut by the edges keep their borders, then copy the window in
        let offset = state.scroller.offset();
        let margin = layout.stride();
        let origin = offset.saturating_sub(margin as usize);
        let scratch_width = inner.width.saturating_add(margin.saturating_mul(2));
        let mut scratch = Buffer::empty(Rect::new(0, 0, scratch_width, layout.height));
        for (cell, geometry) in state.cells().iter().zip(&row.cells) {
            let container_box_x = geometry.container_x + layout.leading_pad() as usize;
            let Some(box_x) = window_x(container_box_x, origin, layout.width, scratch_width) else { continue };
            let (border, text) = self.cell_styles(cell.style, disabled);
            render_cell(&mut scratch, Rect::new(box_x, 0, layout.width, layout.height), cell, border, text);
        }
        copy_visible(&scratch, buf, inner, offset - origin);

        let viewport = inner.intersection(buf.area);
        state.layout_pass(&row, viewport, Instant::now());
    }
}

/// Column of a box inside the scratch window, `None` when it doesn't fit there
fn window_x(box_x: usize, origin: usize, width: u16, scratch_width: u16) -> Option<u16> {
    let x = u16::try_from(box_x.checked_sub(origin)?).ok()?;
    (x.checked_add(width)? <= scratch_width).then_some(x)
}

fn render_cell(buf: &mut Buffer, area: Rect, cell: &CellDescriptor, border: Style, text: Style) {
    let block = Block::bordered().border_type(BorderType::Rounded).border_style(border);
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.is_empty() {
        return;
    }
    let x = inner.x + (inner.width - 1) / 2;
    let y = inner.y + (inner.height - 1) / 2;
    buf.set_string(x, y, cell.display.to_string(), text);
}

fn copy_visible(scratch: &Buffer, buf: &mut Buffer, area: Rect, skip: usize) {
    let Ok(skip) = u16::try_from(skip) else { return };
    let rows = area.height.min(scratch.area.height);
    for row in 0..rows {
        for col in 0..area.width {
            let Some(src) = scratch.cell((skip.saturating_add(col), row)) else { continue };
            if let Some(dst) = buf.cell_mut((area.x + col, area.y + row)) {
                *dst = src.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::widgets::Borders;

    use super::*;
    use crate::field::{CodeFieldConfig, ScrollCurve};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn type_chars(state: &mut CodeFieldState, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_renders_filled_and_empty_cells() {
        let config = CodeFieldConfig { initial_text: "12".into(), char_empty_placeholder: '_', ..Default::default() };
        let mut state = CodeFieldState::new(config);
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 3));

        CodeField::new().render(buf.area, &mut buf, &mut state);

        assert_eq!(row_text(&buf, 0), "╭───╮ ╭───╮ ╭───╮ ╭───╮ ");
        assert_eq!(row_text(&buf, 1), "│ 1 │ │ 2 │ │ _ │ │ _ │ ");
        assert_eq!(row_text(&buf, 2), "╰───╯ ╰───╯ ╰───╯ ╰───╯ ");
    }

    #[test]
    fn test_masked_cells() {
        let config = CodeFieldConfig { initial_text: "ab".into(), char_masker: Some('•'), ..Default::default() };
        let mut state = CodeFieldState::new(config);
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 3));

        CodeField::new().render(buf.area, &mut buf, &mut state);

        assert_eq!(row_text(&buf, 1), "│ • │ │ • │ │   │ │   │ ");
    }

    #[test]
    fn test_narrow_row_is_centered() {
        let config = CodeFieldConfig { max_length: 2, initial_text: "7".into(), ..Default::default() };
        let mut state = CodeFieldState::new(config);
        let mut buf = Buffer::empty(Rect::new(0, 0, 16, 3));

        CodeField::new().render(buf.area, &mut buf, &mut state);

        assert_eq!(row_text(&buf, 1), "  │ 7 │ │   │   ");
    }

    #[test]
    fn test_current_cell_uses_current_style() {
        let mut state = CodeFieldState::new(CodeFieldConfig { initial_text: "1".into(), ..Default::default() });
        state.focus();
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 3));

        CodeField::new().render(buf.area, &mut buf, &mut state);

        assert_eq!(buf[(6, 0)].fg, Color::Yellow);
        assert_eq!(buf[(0, 0)].fg, Color::Cyan);
        assert!(buf[(8, 1)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_current_falls_back_to_default_style() {
        let styles = CellStyles { current: None, ..Default::default() };
        let mut state = CodeFieldState::new(CodeFieldConfig::default());
        state.focus();
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 3));

        CodeField::new().styles(styles).render(buf.area, &mut buf, &mut state);

        assert_eq!(buf[(0, 0)].fg, Color::Cyan);
    }

    #[test]
    fn test_disabled_renders_dimmed_content() {
        let config = CodeFieldConfig { enabled: false, initial_text: "9".into(), ..Default::default() };
        let mut state = CodeFieldState::new(config);
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 3));

        CodeField::new().render(buf.area, &mut buf, &mut state);

        assert_eq!(buf[(2, 1)].symbol(), "9");
        assert!(buf[(2, 1)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_render_inside_block() {
        let mut state = CodeFieldState::new(CodeFieldConfig::default());
        let mut buf = Buffer::empty(Rect::new(0, 0, 26, 5));

        CodeField::new().block(Block::default().borders(Borders::ALL)).render(buf.area, &mut buf, &mut state);

        assert_eq!(state.area, Rect::new(1, 1, 24, 3));
        assert_eq!(row_text(&buf, 1), "│╭───╮ ╭───╮ ╭───╮ ╭───╮ │");
    }

    #[test]
    fn test_typing_past_edge_scrolls_row() {
        let config = CodeFieldConfig { max_length: 10, scroll_curve: ScrollCurve::Snap, ..Default::default() };
        let mut state = CodeFieldState::new(config);
        state.focus();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        type_chars(&mut state, "123");
        CodeField::new().render(area, &mut buf, &mut state);
        assert!(state.scroller.is_animating());

        assert!(state.tick(Instant::now()));
        assert_eq!(state.scroller.offset(), 12);

        buf.reset();
        CodeField::new().render(area, &mut buf, &mut state);
        assert_eq!(row_text(&buf, 1), "│ 3 │ │   │ │   │ │ ");
        assert_eq!(state.screen_cursor(), Some(ratatui::layout::Position::new(8, 1)));
    }

    #[test]
    fn test_row_wider_than_u16_scrolls_to_end() {
        let config = CodeFieldConfig {
            max_length: 11_000,
            initial_text: "1".repeat(10_999),
            scroll_curve: ScrollCurve::Snap,
            ..Default::default()
        };
        let mut state = CodeFieldState::new(config);
        state.focus();
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);

        CodeField::new().render(area, &mut buf, &mut state);
        assert!(state.tick(Instant::now()));
        assert_eq!(state.scroller.offset(), 65_920);

        buf.reset();
        CodeField::new().render(area, &mut buf, &mut state);
        let expected = format!("│ {}│   │ ", "│ 1 │ ".repeat(12));
        assert_eq!(row_text(&buf, 1), expected);
        assert_eq!(state.screen_cursor(), Some(ratatui::layout::Position::new(76, 1)));
    }

    #[test]
    fn test_visible_boundary_does_not_scroll() {
        let config = CodeFieldConfig { max_length: 10, ..Default::default() };
        let mut state = CodeFieldState::new(config);
        state.focus();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        type_chars(&mut state, "12");
        CodeField::new().render(area, &mut buf, &mut state);

        assert!(!state.scroller.is_animating());
        assert!(!state.tick(Instant::now()));
        assert_eq!(state.scroller.offset(), 0);
    }
}
