mod action;
mod app;
mod components;
mod event;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use livevote_lib::{Config, GameId, HttpVoteApi, VoteApi};
use ratatui::layout::Position;
use tokio::sync::mpsc;

use action::Action;
use app::{App, Screen};
use components::{
    panel::{PanelComponent, ROWS_PER_CANDIDATE},
    wallet::WalletComponent,
};
use event::{Event, EventHandler};
use tui::Tui;

/// Config file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "livevote.json";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let config = load_config()?;
    let api: Arc<dyn VoteApi> = Arc::new(HttpVoteApi::from_config(&config)?);
    log::info!("Vote service at {}, game {}", config.api_url, config.game_id);

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(config, action_tx.clone());
    action_tx.send(Action::LoadGame)?;

    let mut tui = Tui::new()?;
    tui.enter()?;

    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        tui.draw(|frame| match app.screen {
            Screen::Panel => PanelComponent::render(&mut app, frame),
            Screen::Wallet => WalletComponent::render(&app, frame),
        })?;

        tokio::select! {
            // Terminal events
            Some(event) = events.next() => {
                for action in handle_event(&app, event) {
                    action_tx.send(action)?;
                }
            }

            // Actions, spawning the async ones
            Some(action) = action_rx.recv() => {
                match &action {
                    Action::LoadGame => {
                        let api = api.clone();
                        let game_id = app.config.game_id;
                        let tx = action_tx.clone();
                        tokio::spawn(async move {
                            let result = load_game(api.as_ref(), game_id).await;
                            let _ = tx.send(Action::GameLoaded(result));
                        });
                    }
                    Action::LoadVoteInfo(request) => {
                        let api = api.clone();
                        let request = request.clone();
                        let tx = action_tx.clone();
                        tokio::spawn(async move {
                            let result = api
                                .get_vote_info(&request.address, request.game_id)
                                .await
                                .map_err(|e| e.to_string());
                            let _ = tx.send(Action::VoteInfoLoaded(request, result));
                        });
                    }
                    Action::SubmitVote(ticket) => {
                        let api = api.clone();
                        let ticket = ticket.clone();
                        let wallet = app.wallet.clone();
                        let tx = action_tx.clone();
                        tokio::spawn(async move {
                            let outcome = match wallet {
                                Some(wallet) => {
                                    livevote_lib::submit_vote(wallet.as_ref(), api.as_ref(), &ticket).await
                                }
                                None => livevote_lib::SubmissionOutcome::Failed(
                                    "wallet disconnected before signing".to_string(),
                                ),
                            };
                            let _ = tx.send(Action::VoteSubmitted(outcome));
                        });
                    }
                    _ => {}
                }

                app.handle_action(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    events.stop();
    tui.exit()?;

    Ok(())
}

/// Load `LIVEVOTE_CONFIG` or `livevote.json` if present, defaults otherwise
fn load_config() -> Result<Config> {
    let path = std::env::var_os("LIVEVOTE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if path.exists() {
        log::info!("Loading config from {}", path.display());
        Ok(Config::load_from_file(&path)?)
    } else {
        log::info!("No config at {}, using defaults", path.display());
        Ok(Config::default())
    }
}

/// Fetch the game descriptor and its players
async fn load_game(
    api: &dyn VoteApi,
    game_id: GameId,
) -> Result<(livevote_lib::GameDescriptor, Vec<livevote_lib::Candidate>), String> {
    let (game, players) = tokio::try_join!(api.get_game(game_id), api.get_players(game_id))
        .map_err(|e| e.to_string())?;
    Ok((game, players))
}

/// Convert terminal events to actions
fn handle_event(app: &App, event: Event) -> Vec<Action> {
    match event {
        Event::Tick => vec![Action::Tick],
        Event::Key(key) => handle_key_event(app, key).into_iter().collect(),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Paste(text) if app.screen == Screen::Wallet => {
            clean_paste(&text).map(Action::InputPaste).into_iter().collect()
        }
        Event::Paste(_) => vec![],
        Event::Resize => vec![Action::Render],
    }
}

/// Handle keyboard events based on current screen
fn handle_key_event(app: &App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match app.screen {
        Screen::Panel if app.panel.is_prompting() => handle_prompt_keys(key),
        Screen::Panel => handle_panel_keys(key),
        Screen::Wallet => handle_wallet_keys(key),
    }
}

fn handle_panel_keys(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::ToggleSelected),
        KeyCode::Char('v') => Some(Action::Vote),
        KeyCode::Char('w') => Some(Action::OpenWallet),
        KeyCode::Char('r') => Some(Action::LoadGame),
        KeyCode::Esc => Some(Action::ClearToast),
        _ => None,
    }
}

/// Keys while the connect-wallet prompt is open
fn handle_prompt_keys(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::OpenWallet),
        KeyCode::Esc => Some(Action::DismissPrompt),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn handle_wallet_keys(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(Action::CloseWallet),
        KeyCode::Enter => Some(Action::ConnectWallet),
        KeyCode::Char('u') if ctrl => Some(Action::InputClear),
        KeyCode::Char('d') if ctrl => Some(Action::DisconnectWallet),
        KeyCode::Char('v') if ctrl => {
            let mut clipboard = arboard::Clipboard::new().ok()?;
            let text = clipboard.get_text().ok()?;
            clean_paste(&text).map(Action::InputPaste)
        }
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::InputBackspace),
        _ => None,
    }
}

/// Strip line breaks and surrounding whitespace from pasted text
fn clean_paste(text: &str) -> Option<String> {
    let clean = text.trim().replace(['\n', '\r'], "");
    (!clean.is_empty()).then_some(clean)
}

/// Handle mouse events - returns actions to execute
fn handle_mouse_event(app: &App, mouse: MouseEvent) -> Vec<Action> {
    if app.screen != Screen::Panel || app.panel.is_prompting() {
        return vec![];
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Clicking a row focuses and toggles it
            match candidate_at(app, mouse.column, mouse.row) {
                Some(idx) => vec![Action::CursorTo(idx), Action::ToggleSelected],
                None => vec![],
            }
        }
        MouseEventKind::ScrollUp => vec![Action::CursorUp],
        MouseEventKind::ScrollDown => vec![Action::CursorDown],
        _ => vec![],
    }
}

/// Index of the candidate drawn at a terminal cell, if any
fn candidate_at(app: &App, column: u16, row: u16) -> Option<usize> {
    let area = app.list_area;
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    // Only whole items are drawn, a trailing odd row stays blank
    let slot = (row - area.y) / ROWS_PER_CANDIDATE;
    if slot >= area.height / ROWS_PER_CANDIDATE {
        return None;
    }
    let idx = app.list_state.offset() + slot as usize;
    (idx < app.panel.candidates().len()).then_some(idx)
}
