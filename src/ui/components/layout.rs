//! Layout helpers and common rendering utilities

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
};

/// Fixed sized rect centered in `r`, shrunk to fit
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn create_popup_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

/// Width a code field needs to show every cell plus its frame
pub fn field_width(cells: usize, stride: u16, frame: u16) -> u16 {
    let width = cells.saturating_mul(stride as usize).saturating_add(frame as usize);
    u16::try_from(width).unwrap_or(u16::MAX)
}
