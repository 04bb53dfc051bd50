use std::sync::Arc;
use std::time::{Duration, Instant};

use livevote_lib::{
    Candidate, Config, GameDescriptor, MessageSigner, Sr25519Wallet, Toast, VoteInfoRequest,
    VotePanel, VoteRequest,
};
use ratatui::{layout::Rect, widgets::ListState};
use tokio::sync::mpsc;

use crate::action::Action;

/// Current screen/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Panel,
    Wallet,
}

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Application state
pub struct App {
    /// Current screen
    pub screen: Screen,

    /// Whether the app should quit
    pub should_quit: bool,

    pub config: Config,

    /// The vote panel for the configured game
    pub panel: VotePanel,

    /// Loading state for game descriptor and players
    pub game_loading: LoadingState,

    /// Cursor position in the candidate list
    pub cursor: usize,

    /// Scroll position of the candidate list, kept across frames
    pub list_state: ListState,

    /// Inner area of the candidate list as last drawn, empty when hidden
    pub list_area: Rect,

    /// Secret URI typed on the wallet screen (never persisted)
    pub secret_uri: String,

    /// Connected wallet
    pub wallet: Option<Arc<Sr25519Wallet>>,

    /// Why the last connect attempt failed
    pub wallet_error: Option<String>,

    /// Toast on screen and when it was raised
    pub toast: Option<(Toast, Instant)>,

    /// Action sender for async operations
    pub action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(config: Config, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let panel = VotePanel::new(GameDescriptor::new(config.game_id, false), Vec::new());
        Self {
            screen: Screen::Panel,
            should_quit: false,
            config,
            panel,
            game_loading: LoadingState::Idle,
            cursor: 0,
            list_state: ListState::default(),
            list_area: Rect::default(),
            secret_uri: String::new(),
            wallet: None,
            wallet_error: None,
            toast: None,
            action_tx,
        }
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet.as_deref().map(|w| w.address())
    }

    /// Candidate under the cursor
    pub fn cursor_candidate(&self) -> Option<&Candidate> {
        self.panel.candidates().get(self.cursor)
    }

    fn send(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    fn request_vote_info(&self, request: Option<VoteInfoRequest>) {
        if let Some(request) = request {
            self.send(Action::LoadVoteInfo(request));
        }
    }

    fn show_toast(&mut self, toast: Option<Toast>) {
        if let Some(toast) = toast {
            self.toast = Some((toast, Instant::now()));
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.panel.candidates().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Handle an action and update state
    pub fn handle_action(&mut self, action: Action) {
        match action {
            // Lifecycle
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                let ttl = Duration::from_millis(self.config.toast_duration_ms);
                if self.toast.as_ref().is_some_and(|(_, at)| at.elapsed() >= ttl) {
                    self.toast = None;
                }
            }
            Action::Render => {
                // Redrawn at the top of the main loop
            }

            // Navigation
            Action::OpenWallet => {
                self.screen = Screen::Wallet;
                self.wallet_error = None;
            }
            Action::CloseWallet => {
                self.screen = Screen::Panel;
            }

            // Candidate list
            Action::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::CursorDown => {
                if self.cursor + 1 < self.panel.candidates().len() {
                    self.cursor += 1;
                }
            }
            Action::CursorTo(idx) => {
                if idx < self.panel.candidates().len() {
                    self.cursor = idx;
                }
            }
            Action::ToggleSelected => {
                if let Some(id) = self.cursor_candidate().map(|c| c.id) {
                    let toast = self.panel.select_candidate(id);
                    self.show_toast(toast);
                }
            }

            // Voting
            Action::Vote => match self.panel.request_vote() {
                VoteRequest::Submit(ticket) => self.send(Action::SubmitVote(ticket)),
                VoteRequest::Blocked(toast) => self.show_toast(Some(toast)),
                VoteRequest::PromptConnect | VoteRequest::Busy => {}
            },
            Action::SubmitVote(_) => {
                // Spawned by the main loop
            }
            Action::VoteSubmitted(outcome) => {
                let toast = self.panel.complete_submission(outcome);
                self.show_toast(toast);
            }
            Action::DismissPrompt => {
                self.panel.dismiss_prompt();
            }

            // Game data
            Action::LoadGame => {
                self.game_loading = LoadingState::Loading;
            }
            Action::GameLoaded(result) => match result {
                Ok((game, players)) => {
                    let request = self.panel.set_game(game);
                    self.panel.set_candidates(players);
                    self.clamp_cursor();
                    self.game_loading = LoadingState::Loaded;
                    self.request_vote_info(request);
                }
                Err(e) => {
                    log::error!("Failed to load game {}: {}", self.config.game_id, e);
                    self.game_loading = LoadingState::Error(e);
                }
            },
            Action::LoadVoteInfo(_) => {
                // Spawned by the main loop
            }
            Action::VoteInfoLoaded(request, result) => match result {
                Ok(info) => self.panel.store_vote_info(&request, info),
                Err(e) => log::warn!("Vote info lookup for {} failed: {}", request.address, e),
            },

            // Wallet
            Action::ConnectWallet => {
                match Sr25519Wallet::from_uri(self.secret_uri.trim(), self.config.ss58_prefix) {
                    Ok(wallet) => {
                        let wallet = Arc::new(wallet);
                        let request = self.panel.wallet_changed(Some(wallet.address()));
                        self.wallet = Some(wallet);
                        self.wallet_error = None;
                        self.screen = Screen::Panel;
                        self.request_vote_info(request);
                    }
                    Err(e) => {
                        self.wallet_error = Some(e.to_string());
                    }
                }
            }
            Action::DisconnectWallet => {
                self.wallet = None;
                self.secret_uri.clear();
                self.panel.wallet_changed(None);
            }

            // Text input
            Action::InputChar(c) => {
                self.secret_uri.push(c);
                self.wallet_error = None;
            }
            Action::InputBackspace => {
                self.secret_uri.pop();
                self.wallet_error = None;
            }
            Action::InputClear => {
                self.secret_uri.clear();
                self.wallet_error = None;
            }
            Action::InputPaste(text) => {
                self.secret_uri.push_str(&text);
                self.wallet_error = None;
            }

            // Notifications
            Action::ClearToast => {
                self.toast = None;
            }
        }
    }
}
