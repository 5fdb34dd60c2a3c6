//! Toast notification component
//!
//! A non-blocking overlay in the bottom-right corner, drawn on top of all
//! other content. Border color follows the toast's kind.

use crate::app::notify::Toast;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Area the toast occupies inside `area`
pub fn toast_area(message: &str, area: Rect) -> Rect {
    // Add 4 for padding (1 char each side) and border
    let width = (message.width() as u16 + 4).min(area.width.saturating_sub(4));
    let height = 3; // 1 line of text + 2 for borders

    // Position: bottom-right corner, offset by 2 cells from edge
    let x = area.right().saturating_sub(width + 2);
    let y = area.bottom().saturating_sub(height + 2);

    Rect::new(x, y, width, height.min(area.height))
}

/// Render the toast in the bottom-right corner
pub fn render(f: &mut Frame, area: Rect, toast: &Toast, theme: &Theme) {
    let message = toast.notice.display();
    let toast_area = toast_area(&message, area);
    let color = theme.toast_color(toast.notice.kind);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme.bg));

    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(block);

    // Clear the area first so toast appears on top
    f.render_widget(Clear, toast_area);
    f.render_widget(text, toast_area);
}
