use livevote_lib::{
    Candidate, GameDescriptor, SubmissionOutcome, VoteInfo, VoteInfoRequest, VoteTicket,
};

/// Everything that can change application state
#[derive(Debug, Clone)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,
    Render,

    // Navigation
    OpenWallet,
    CloseWallet,

    // Candidate list
    CursorUp,
    CursorDown,
    CursorTo(usize),
    /// Toggle the candidate under the cursor
    ToggleSelected,

    // Voting
    Vote,
    SubmitVote(VoteTicket),
    VoteSubmitted(SubmissionOutcome),
    DismissPrompt,

    // Game data
    LoadGame,
    GameLoaded(Result<(GameDescriptor, Vec<Candidate>), String>),
    LoadVoteInfo(VoteInfoRequest),
    VoteInfoLoaded(VoteInfoRequest, Result<Option<VoteInfo>, String>),

    // Wallet
    ConnectWallet,
    DisconnectWallet,

    // Text input on the wallet screen
    InputChar(char),
    InputBackspace,
    InputClear,
    InputPaste(String),

    // Notifications
    ClearToast,
}
