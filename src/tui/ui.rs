// UI rendering
//
// Layout, top to bottom: title bar, input, result, optional logs panel,
// status bar. Toasts draw last, over everything.

use super::app::App;
use super::components::toast;
use super::theme::Theme;
use crate::app::{AppState, Clock};
use crate::config::VERSION;
use crate::logging::LogLevel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Height of the logs panel when visible
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw<K: Clock>(f: &mut Frame, app: &App<K>) {
    let theme = app.theme();
    let state = &app.interaction.state;

    f.render_widget(Block::default().style(theme.base()), f.area());

    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Min(5),
    ];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_title(f, chunks[0], state, &theme);
    render_input(f, chunks[1], state, &theme);
    render_result(f, chunks[2], state, &theme);
    if app.show_logs {
        render_logs(f, chunks[3], app, &theme);
    }
    render_status(f, chunks[chunks.len() - 1], state, &theme);

    if let Some(current) = app.interaction.notifier().current() {
        toast::render(f, f.area(), current, &theme);
    }
}

fn render_title(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mode = match state.theme {
        crate::prefs::DisplayMode::Light => "☀ light",
        crate::prefs::DisplayMode::Dark => "☾ dark",
    };
    let left = format!(" reverso v{}", VERSION);
    let pad = (area.width as usize).saturating_sub(left.width() + mode.width() + 1);

    let line = Line::from(vec![
        Span::styled(left, theme.title_style()),
        Span::raw(" ".repeat(pad)),
        Span::styled(mode, Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(line).style(theme.base()), area);
}

/// Where the cursor sits inside an unwrapped text box, and how far the
/// content must scroll to keep it visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLayout {
    pub x: u16,
    pub y: u16,
    pub scroll_y: u16,
    pub scroll_x: u16,
}

pub fn cursor_layout(before_cursor: &str, width: u16, height: u16) -> CursorLayout {
    // Paragraph scroll offsets are u16; past that the cursor pins to the edge
    let row = u16::try_from(before_cursor.matches('\n').count()).unwrap_or(u16::MAX);
    let col = before_cursor
        .rsplit('\n')
        .next()
        .map(|line| u16::try_from(line.width()).unwrap_or(u16::MAX))
        .unwrap_or(0);

    let scroll_y = row.saturating_sub(height.saturating_sub(1));
    let scroll_x = col.saturating_sub(width.saturating_sub(1));
    CursorLayout {
        x: col - scroll_x,
        y: row - scroll_y,
        scroll_y,
        scroll_x,
    }
}

fn render_input(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let counter = Span::styled(
        format!(" {} ", state.counter_label()),
        Style::default().fg(theme.counter_color(state.counter_level())),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border_focused))
        .title(Span::styled(" Text ", theme.title_style()))
        .title_bottom(Line::from(counter).right_aligned());

    let inner = block.inner(area);
    let cursor = cursor_layout(state.before_cursor(), inner.width, inner.height);

    let body = if state.input.is_empty() {
        Paragraph::new(Span::styled(
            "Type something to reverse…",
            Style::default().fg(theme.placeholder),
        ))
    } else {
        Paragraph::new(state.input.as_str()).scroll((cursor.scroll_y, cursor.scroll_x))
    };
    f.render_widget(body.style(theme.base()).block(block), area);

    if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x + cursor.x, inner.y + cursor.y));
    }
}

fn render_result(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(" Reversed ", theme.title_style()));

    let body = match (&state.result, state.pending) {
        (_, true) => Paragraph::new(Span::styled(
            "Reversing…",
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        )),
        (Some(result), false) => {
            Paragraph::new(result.as_str()).style(Style::default().fg(theme.result))
        }
        (None, false) => Paragraph::new(Span::styled(
            "Your reversed text will appear here",
            Style::default().fg(theme.placeholder),
        )),
    };

    f.render_widget(
        body.wrap(Wrap { trim: false })
            .style(Style::default().bg(theme.bg))
            .block(block),
        area,
    );
}

fn render_logs<K: Clock>(f: &mut Frame, area: Rect, app: &App<K>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(" Logs ", theme.title_style()));

    let rows = block.inner(area).height as usize;
    let lines: Vec<Line> = app
        .log_buffer
        .recent(rows)
        .into_iter()
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Error => theme.log_error,
                LogLevel::Warn => theme.log_warn,
                LogLevel::Info => theme.log_info,
                LogLevel::Debug | LogLevel::Trace => theme.log_debug,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(format!("{:<5} ", entry.level.as_str()), Style::default().fg(color)),
                Span::raw(entry.message),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).style(theme.base()).block(block), area);
}

/// Key hints; unavailable actions are dimmed
fn render_status(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let hint = |keys: &'static str, label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(theme.status_bar)
        } else {
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::DIM)
        };
        vec![
            Span::styled(keys, style.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {}  ", label), style),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    spans.extend(hint("Enter", "reverse", state.can_reverse()));
    spans.extend(hint("^Y", "copy", state.can_copy()));
    spans.extend(hint("^T", "theme", true));
    spans.extend(hint("^L", "clear", !state.input.is_empty() || state.has_result()));
    spans.extend(hint("F2", "logs", true));
    spans.extend(hint("Esc", "quit", true));

    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_at_origin() {
        let layout = cursor_layout("", 20, 3);
        assert_eq!(
            layout,
            CursorLayout {
                x: 0,
                y: 0,
                scroll_y: 0,
                scroll_x: 0
            }
        );
    }

    #[test]
    fn test_cursor_follows_lines_and_wide_chars() {
        let layout = cursor_layout("first\n日本", 20, 3);
        assert_eq!((layout.x, layout.y), (4, 1));
    }

    #[test]
    fn test_cursor_scrolls_when_out_of_view() {
        let layout = cursor_layout(&"x".repeat(30), 10, 3);
        assert_eq!(layout.scroll_x, 21);
        assert_eq!(layout.x, 9);

        let layout = cursor_layout("a\nb\nc\nd\ne", 10, 3);
        assert_eq!(layout.scroll_y, 2);
        assert_eq!(layout.y, 2);
    }

    #[test]
    fn test_cursor_saturates_on_huge_input() {
        let layout = cursor_layout(&"x".repeat(70_000), 10, 3);
        assert_eq!(layout.scroll_x, u16::MAX - 9);
        assert_eq!(layout.x, 9);

        let layout = cursor_layout(&"\n".repeat(70_000), 10, 3);
        assert_eq!(layout.scroll_y, u16::MAX - 2);
        assert_eq!(layout.y, 2);
    }
}
