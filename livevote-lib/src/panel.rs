//! Vote panel state machine.
//!
//! The panel owns everything the voting widget keeps locally: the selected
//! candidate, whether the connect-wallet prompt is open, whether a
//! submission is in flight, and the last vote-info lookup. Those are folded
//! into one [`PanelState`] so that "loading" and "can still click" can never
//! both hold.

use std::fmt::Display;

use crate::primitives::{Candidate, CandidateId, GameDescriptor, GameId, VoteInfo};

/// Shown when a candidate is clicked or a vote requested outside the voting phase
pub const MSG_VOTING_CLOSED: &str = "It has not yet reached the voting stage.";
/// Shown when the vote service accepted the vote
pub const MSG_VOTE_SUCCESS: &str = "Vote Success";
/// Shown when a vote is requested without a selection
pub const MSG_NO_SELECTION: &str = "Select a player before voting.";
/// Shown when the selected player can no longer receive votes
pub const MSG_CANDIDATE_UNAVAILABLE: &str = "The selected player can no longer be voted for.";

/// Local state of the vote panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Selected(CandidateId),
    /// Connect-wallet prompt open; the selection survives it
    PromptConnect { selection: CandidateId },
    /// Vote for the candidate is being signed and submitted
    Submitting(CandidateId),
}

impl PanelState {
    pub fn selection(&self) -> Option<CandidateId> {
        match *self {
            PanelState::Idle => None,
            PanelState::Selected(id)
            | PanelState::PromptConnect { selection: id }
            | PanelState::Submitting(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Non-blocking notification for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

impl Display for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Everything needed to sign and submit one vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTicket {
    pub address: String,
    pub game_id: GameId,
    pub candidate_id: CandidateId,
}

/// What the host should do after the vote control was activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteRequest {
    /// Sign and submit; the panel is now `Submitting`
    Submit(VoteTicket),
    /// No wallet connected; the connect prompt is now open
    PromptConnect,
    /// The vote cannot be cast; show the toast
    Blocked(Toast),
    /// A submission is already in flight
    Busy,
}

/// How a submission attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    /// The service refused the vote, with its message
    Rejected(String),
    /// Signing or transport failed
    Failed(String),
    /// The wallet returned an empty signature
    Unsigned,
}

/// Vote-info lookup the host should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteInfoRequest {
    pub address: String,
    pub game_id: GameId,
}

/// The vote panel for a single game
#[derive(Debug, Clone)]
pub struct VotePanel {
    game: GameDescriptor,
    candidates: Vec<Candidate>,
    state: PanelState,
    wallet_address: Option<String>,
    vote_info: Option<VoteInfo>,
}

impl VotePanel {
    pub fn new(game: GameDescriptor, candidates: Vec<Candidate>) -> Self {
        Self {
            game,
            candidates,
            state: PanelState::Idle,
            wallet_address: None,
            vote_info: None,
        }
    }

    pub fn game(&self) -> &GameDescriptor {
        &self.game
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn selection(&self) -> Option<CandidateId> {
        self.state.selection()
    }

    pub fn is_selected(&self, id: CandidateId) -> bool {
        self.selection() == Some(id)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::Submitting(_))
    }

    pub fn is_prompting(&self) -> bool {
        matches!(self.state, PanelState::PromptConnect { .. })
    }

    pub fn voting_open(&self) -> bool {
        self.game.voting_open
    }

    /// Whether the vote control is enabled
    pub fn can_vote(&self) -> bool {
        matches!(self.state, PanelState::Selected(_))
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    pub fn vote_info(&self) -> Option<&VoteInfo> {
        self.vote_info.as_ref()
    }

    /// Toggle the selection of a candidate
    ///
    /// Returns a toast when the click is refused outside the voting phase.
    pub fn select_candidate(&mut self, id: CandidateId) -> Option<Toast> {
        if !self.game.voting_open {
            return Some(Toast::error(MSG_VOTING_CLOSED));
        }
        if !self.candidate(id).is_some_and(Candidate::is_alive) {
            return None;
        }

        self.state = match self.state {
            PanelState::Idle => PanelState::Selected(id),
            PanelState::Selected(current) if current == id => PanelState::Idle,
            PanelState::Selected(_) => PanelState::Selected(id),
            state @ (PanelState::PromptConnect { .. } | PanelState::Submitting(_)) => {
                log::debug!("Ignoring selection of {} while {:?}", id, state);
                state
            }
        };
        None
    }

    /// Activate the vote control
    pub fn request_vote(&mut self) -> VoteRequest {
        let id = match self.state {
            PanelState::Submitting(_) => return VoteRequest::Busy,
            PanelState::Idle => return VoteRequest::Blocked(Toast::error(MSG_NO_SELECTION)),
            PanelState::Selected(id) | PanelState::PromptConnect { selection: id } => id,
        };

        if !self.game.voting_open {
            return VoteRequest::Blocked(Toast::error(MSG_VOTING_CLOSED));
        }
        if !self.candidate(id).is_some_and(Candidate::is_alive) {
            self.state = PanelState::Idle;
            return VoteRequest::Blocked(Toast::error(MSG_CANDIDATE_UNAVAILABLE));
        }

        match self.wallet_address.clone() {
            None => {
                self.state = PanelState::PromptConnect { selection: id };
                VoteRequest::PromptConnect
            }
            Some(address) => {
                self.state = PanelState::Submitting(id);
                log::info!("Submitting vote for player {} in game {}", id, self.game.id);
                VoteRequest::Submit(VoteTicket {
                    address,
                    game_id: self.game.id,
                    candidate_id: id,
                })
            }
        }
    }

    /// Apply the result of a submission and leave the `Submitting` state
    pub fn complete_submission(&mut self, outcome: SubmissionOutcome) -> Option<Toast> {
        let PanelState::Submitting(id) = self.state else {
            log::warn!("Submission outcome {:?} arrived while {:?}", outcome, self.state);
            return None;
        };

        match outcome {
            SubmissionOutcome::Accepted => {
                self.state = PanelState::Idle;
                Some(Toast::success(MSG_VOTE_SUCCESS))
            }
            SubmissionOutcome::Rejected(msg) => {
                self.state = PanelState::Selected(id);
                Some(Toast::error(msg))
            }
            SubmissionOutcome::Failed(err) => {
                log::error!("Vote submission for player {} failed: {}", id, err);
                self.state = PanelState::Selected(id);
                None
            }
            SubmissionOutcome::Unsigned => {
                log::warn!("Wallet returned an empty signature, vote not sent");
                self.state = PanelState::Selected(id);
                None
            }
        }
    }

    /// Track the connected wallet
    ///
    /// A newly present address closes the connect prompt and asks the host to
    /// look up the vote info for it.
    pub fn wallet_changed(&mut self, address: Option<&str>) -> Option<VoteInfoRequest> {
        let address = address.filter(|a| !a.is_empty());
        if self.wallet_address.as_deref() == address {
            return None;
        }

        self.wallet_address = address.map(str::to_string);
        self.vote_info = None;

        let address = address?;
        if let PanelState::PromptConnect { selection } = self.state {
            self.state = PanelState::Selected(selection);
        }
        Some(VoteInfoRequest {
            address: address.to_string(),
            game_id: self.game.id,
        })
    }

    /// Store a vote-info lookup result if it still matches the wallet and game
    pub fn store_vote_info(&mut self, request: &VoteInfoRequest, info: Option<VoteInfo>) {
        if self.wallet_address.as_deref() != Some(request.address.as_str())
            || self.game.id != request.game_id
        {
            log::debug!("Dropping stale vote info for {}", request.address);
            return;
        }
        log::debug!("Vote info for {} in game {}: {:?}", request.address, request.game_id, info);
        self.vote_info = info;
    }

    /// Close the connect-wallet prompt without connecting
    pub fn dismiss_prompt(&mut self) {
        if let PanelState::PromptConnect { selection } = self.state {
            self.state = PanelState::Selected(selection);
        }
    }

    /// Replace the game descriptor
    ///
    /// Switching to another game drops the selection and returns a fresh
    /// vote-info lookup for the connected wallet.
    pub fn set_game(&mut self, game: GameDescriptor) -> Option<VoteInfoRequest> {
        let game_changed = game.id != self.game.id;
        self.game = game;
        if !game_changed {
            return None;
        }

        if !self.is_loading() {
            self.state = PanelState::Idle;
        }
        self.vote_info = None;
        self.wallet_address.as_ref().map(|address| VoteInfoRequest {
            address: address.clone(),
            game_id: self.game.id,
        })
    }

    /// Replace the candidate list, dropping a selection that is no longer votable
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        if let PanelState::Selected(id) = self.state {
            if !self.candidate(id).is_some_and(Candidate::is_alive) {
                self.state = PanelState::Idle;
            }
        }
    }
}
