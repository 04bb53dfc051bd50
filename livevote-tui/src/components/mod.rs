pub mod connect;
pub mod panel;
pub mod wallet;

use livevote_lib::{Toast, ToastLevel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Rect of the given size centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

/// One-line rendering of a toast
pub fn toast_line(toast: &Toast) -> Line<'_> {
    let (icon, color) = match toast.level {
        ToastLevel::Success => ("✔ ", Color::Green),
        ToastLevel::Error => ("✖ ", Color::Red),
    };
    Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(toast.message.as_str(), Style::default().fg(color)),
    ])
}
