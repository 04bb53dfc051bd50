use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::components::centered_rect;

/// Connect-wallet prompt drawn over the panel
pub struct ConnectComponent;

impl ConnectComponent {
    pub fn render(frame: &mut Frame) {
        let area = centered_rect(46, 9, frame.area());

        let text = vec![
            Line::from(Span::styled(
                "Connect Wallet",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Please connect your wallet to continue",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[ Enter: Connect Wallet ]",
                Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Esc: Close", Style::default().fg(Color::DarkGray))),
        ];

        let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(dialog, area);
    }
}
