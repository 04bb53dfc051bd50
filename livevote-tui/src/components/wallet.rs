use livevote_lib::MessageSigner;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Wallet screen: connect by secret URI
pub struct WalletComponent;

impl WalletComponent {
    pub fn render(app: &App, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Secret URI
                Constraint::Length(4), // Status
                Constraint::Min(0),
                Constraint::Length(3), // Help
            ])
            .split(frame.area());

        let title = Paragraph::new("Connect Wallet")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, chunks[0]);

        // Mask secret URI, show only first few chars
        let display = if app.secret_uri.chars().count() > 4 {
            format!("{}****", app.secret_uri.chars().take(4).collect::<String>())
        } else {
            app.secret_uri.clone()
        };
        let input = Paragraph::new(format!("{}_", display))
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title("Secret URI (e.g. //Alice or mnemonic)").borders(Borders::ALL));
        frame.render_widget(input, chunks[1]);

        let status = match (&app.wallet_error, app.wallet.as_deref()) {
            (Some(e), _) => Line::from(Span::styled(format!("Error: {}", e), Style::default().fg(Color::Red))),
            (None, Some(wallet)) => Line::from(vec![
                Span::styled("Connected: ", Style::default().fg(Color::Yellow)),
                Span::styled(wallet.address().to_string(), Style::default().fg(Color::Green)),
            ]),
            (None, None) => Line::from(Span::styled("Not connected", Style::default().fg(Color::DarkGray))),
        };
        let status = Paragraph::new(status).block(Block::default().title("Status").borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new("Enter: Connect | Ctrl+V: Paste | Ctrl+U: Clear | Ctrl+D: Disconnect | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(help, chunks[4]);
    }
}
