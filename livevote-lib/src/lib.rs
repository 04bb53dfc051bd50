//! Live Vote Library - vote panel for game participants
//!
//! This library holds everything the live vote widget needs apart from
//! rendering: the panel state machine, wallet signing, and the client for
//! the remote vote service.
//!
//! # Overview
//!
//! 1. The host supplies a [`GameDescriptor`] and the [`Candidate`] list
//! 2. Clicks toggle the selection of alive candidates while voting is open
//! 3. Voting signs a timestamp with the wallet and submits the vote
//! 4. The outcome is applied back to the panel and surfaced as a [`Toast`]
//!
//! # Example
//!
//! ```ignore
//! use livevote_lib::{HttpVoteApi, Sr25519Wallet, VotePanel, VoteRequest, submit_vote};
//!
//! let api = HttpVoteApi::from_config(&config)?;
//! let wallet = Sr25519Wallet::from_uri("//Alice", config.ss58_prefix)?;
//!
//! let mut panel = VotePanel::new(api.get_game(1).await?, api.get_players(1).await?);
//! panel.wallet_changed(Some(wallet.address()));
//! panel.select_candidate(42);
//! if let VoteRequest::Submit(ticket) = panel.request_vote() {
//!     let outcome = submit_vote(&wallet, &api, &ticket).await;
//!     let toast = panel.complete_submission(outcome);
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod panel;
pub mod primitives;
pub mod submit;
pub mod wallet;

// Re-export main types for convenience
pub use api::{HttpVoteApi, VoteApi};
pub use config::Config;
pub use error::{LiveVoteError, Result};
pub use panel::{
    PanelState, SubmissionOutcome, Toast, ToastLevel, VoteInfoRequest, VotePanel, VoteRequest,
    VoteTicket,
};
pub use primitives::{
    Candidate, CandidateId, CandidateStatus, GameDescriptor, GameId, SubmitVoteResponse, VoteInfo,
};
pub use submit::submit_vote;
pub use wallet::{MessageSigner, Sr25519Wallet, encode_ss58};
