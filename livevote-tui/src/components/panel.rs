use livevote_lib::{Candidate, Config, VotePanel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, LoadingState};
use crate::components::{connect::ConnectComponent, toast_line};

/// Background of rows that can be voted for
const ALIVE_BG: Color = Color::Rgb(19, 35, 0);
/// Accent of the selected row
const SELECTED: Color = Color::Rgb(139, 228, 33);

/// Each candidate takes two lines
pub const ROWS_PER_CANDIDATE: u16 = 2;

const HEADER_HEIGHT: u16 = 4;

pub struct PanelComponent;

impl PanelComponent {
    pub fn render(app: &mut App, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Title, game, lock
                Constraint::Min(6),                // Candidates
                Constraint::Length(3),             // Vote button
                Constraint::Length(2),             // Toast / help
            ])
            .split(frame.area());

        Self::render_header(app, frame, chunks[0]);
        Self::render_candidates(app, frame, chunks[1]);
        Self::render_vote_button(app, frame, chunks[2]);
        Self::render_footer(app, frame, chunks[3]);

        if app.panel.is_prompting() {
            ConnectComponent::render(frame);
        }
    }

    fn render_header(app: &App, frame: &mut Frame, area: Rect) {
        let lock = if app.panel.voting_open() {
            Span::styled(" 🔓 VOTING OPEN ", Style::default().fg(SELECTED))
        } else {
            Span::styled(" 🔒 LOCKED ", Style::default().fg(Color::DarkGray))
        };
        let wallet = match app.wallet_address() {
            Some(address) => Span::styled(format!(" {} ", short_address(address)), Style::default().fg(Color::Green)),
            None => Span::styled(" no wallet ", Style::default().fg(Color::Red)),
        };

        let text = vec![
            Line::from(Span::styled(
                "Live Vote",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("GAME - {}", app.panel.game().id),
                Style::default().fg(Color::Gray),
            )),
        ];

        let header = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title_top(Line::from(lock).right_aligned())
                .title_bottom(Line::from(wallet).right_aligned()),
        );
        frame.render_widget(header, area);
    }

    fn render_candidates(app: &mut App, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Players").borders(Borders::ALL);

        if app.panel.candidates().is_empty() {
            app.list_area = Rect::default();
            let (text, color) = match &app.game_loading {
                LoadingState::Loading => ("Loading players...".to_string(), Color::Yellow),
                LoadingState::Error(e) => (format!("Error: {}", e), Color::Red),
                LoadingState::Idle | LoadingState::Loaded => {
                    ("No players in this game".to_string(), Color::DarkGray)
                }
            };
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(color))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        app.list_area = block.inner(area);
        app.list_state.select(Some(app.cursor));

        let items: Vec<ListItem> = app
            .panel
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, candidate)| {
                Self::candidate_item(&app.panel, &app.config, candidate, i == app.cursor)
            })
            .collect();

        // The list scrolls the cursor into view and records the offset
        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut app.list_state);
    }

    fn candidate_item<'a>(
        panel: &VotePanel,
        config: &Config,
        candidate: &'a Candidate,
        focused: bool,
    ) -> ListItem<'a> {
        let alive = candidate.is_alive();
        let selected = panel.is_selected(candidate.id);

        let marker = if focused { "▸ " } else { "  " };
        let name_style = if selected {
            Style::default().fg(SELECTED).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let status_style = if alive {
            Style::default().fg(SELECTED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let select_style = match (alive, selected) {
            (true, true) => Style::default().bg(Color::Rgb(99, 161, 26)).fg(Color::White),
            (true, false) => Style::default().bg(Color::Black).fg(Color::White),
            (false, _) => Style::default().bg(Color::Rgb(80, 78, 78)).fg(Color::Gray),
        };

        let first = Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(candidate.name.as_str(), name_style),
            Span::raw(" "),
            Span::styled(candidate.status.to_string(), status_style),
            Span::raw("  "),
            Span::styled(if selected { "[Selected]" } else { "[Select]" }, select_style),
        ]);
        let second = Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("[{}]", candidate.model), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("  {}", candidate.image_url(config)),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let item = ListItem::new(vec![first, second]);
        if alive {
            item.style(Style::default().bg(ALIVE_BG))
        } else {
            item
        }
    }

    fn render_vote_button(app: &App, frame: &mut Frame, area: Rect) {
        let (label, style) = if app.panel.is_loading() {
            ("Submitting...", Style::default().fg(Color::Yellow))
        } else if app.panel.can_vote() {
            ("VOTE", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        } else {
            ("VOTE", Style::default().fg(Color::DarkGray))
        };

        let button = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Gray)));
        frame.render_widget(button, area);
    }

    fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
        let line = match &app.toast {
            Some((toast, _)) => toast_line(toast),
            None => Line::from(Span::styled(
                "↑/↓: Move | Space: Select | v: Vote | w: Wallet | r: Reload | q: Quit",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let footer = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, area);
    }
}

/// First and last characters of an address
fn short_address(address: &str) -> String {
    if address.chars().count() <= 12 {
        return address.to_string();
    }
    let head: String = address.chars().take(6).collect();
    let tail: String = address.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("{}…{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
            "5Grwva…utQY"
        );
        assert_eq!(short_address("5Grw"), "5Grw");
    }
}
