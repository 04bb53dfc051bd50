//! Integration tests for the full live vote flow.
//!
//! These tests use mock implementations of MessageSigner and VoteApi to
//! drive the panel through selection, signing and submission without a
//! running vote service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use livevote_lib::{
    Candidate, CandidateId, CandidateStatus, GameDescriptor, GameId, LiveVoteError,
    MessageSigner, PanelState, Result, Sr25519Wallet, SubmissionOutcome, SubmitVoteResponse,
    Toast, ToastLevel, VoteApi, VoteInfo, VotePanel, VoteRequest, submit_vote,
};

/// Mock vote service that records every call
#[derive(Clone, Default)]
struct MockVoteApi {
    /// Submissions received: (address, game, candidate)
    submissions: Arc<Mutex<Vec<(String, GameId, CandidateId)>>>,
    /// Vote-info lookups received
    lookups: Arc<Mutex<Vec<(String, GameId)>>>,
    /// Response returned for submissions; None simulates a transport error
    response: Arc<Mutex<Option<SubmitVoteResponse>>>,
}

impl MockVoteApi {
    fn responding(response: SubmitVoteResponse) -> Self {
        let api = Self::default();
        *api.response.lock().unwrap() = Some(response);
        api
    }

    fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    fn call_count(&self) -> usize {
        self.submission_count() + self.lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl VoteApi for MockVoteApi {
    async fn get_vote_info(&self, address: &str, game_id: GameId) -> Result<Option<VoteInfo>> {
        self.lookups
            .lock()
            .unwrap()
            .push((address.to_string(), game_id));
        Ok(Some(VoteInfo(serde_json::json!({ "address": address }))))
    }

    async fn submit_vote(
        &self,
        address: &str,
        game_id: GameId,
        candidate_id: CandidateId,
    ) -> Result<SubmitVoteResponse> {
        self.submissions
            .lock()
            .unwrap()
            .push((address.to_string(), game_id, candidate_id));
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| LiveVoteError::Api("connection reset".to_string()))
    }

    async fn get_game(&self, game_id: GameId) -> Result<GameDescriptor> {
        Ok(GameDescriptor::new(game_id, true))
    }

    async fn get_players(&self, _game_id: GameId) -> Result<Vec<Candidate>> {
        Ok(players())
    }
}

/// What the mock wallet does when asked to sign
#[derive(Clone, Copy)]
enum SignBehavior {
    Sign,
    Empty,
    Fail,
}

struct MockSigner {
    address: String,
    behavior: SignBehavior,
    signed: Arc<Mutex<Vec<String>>>,
}

impl MockSigner {
    fn new(behavior: SignBehavior) -> Self {
        Self {
            address: "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".to_string(),
            behavior,
            signed: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl MessageSigner for MockSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        self.signed.lock().unwrap().push(message.to_string());
        match self.behavior {
            SignBehavior::Sign => Ok("ab".repeat(64)),
            SignBehavior::Empty => Ok(String::new()),
            SignBehavior::Fail => Err(LiveVoteError::Signing("user rejected".to_string())),
        }
    }
}

fn players() -> Vec<Candidate> {
    vec![
        Candidate {
            id: 42,
            name: "Ada".to_string(),
            model: "gpt-4o".to_string(),
            status: CandidateStatus::Alive,
            img: Some("/uploads/ada.png".to_string()),
        },
        Candidate {
            id: 7,
            name: "Bob".to_string(),
            model: "claude".to_string(),
            status: CandidateStatus::Dead,
            img: None,
        },
    ]
}

/// Panel for an open game with a connected wallet and player 42 selected
async fn connected_panel_with_selection(api: &MockVoteApi, signer: &MockSigner) -> VotePanel {
    let game = api.get_game(5).await.unwrap();
    let mut panel = VotePanel::new(game, api.get_players(5).await.unwrap());

    let request = panel.wallet_changed(Some(signer.address())).unwrap();
    let info = api
        .get_vote_info(&request.address, request.game_id)
        .await
        .unwrap();
    panel.store_vote_info(&request, info);

    assert_eq!(panel.select_candidate(42), None);
    panel
}

/// Activate the vote control and run the submission the way the host does
async fn vote(panel: &mut VotePanel, signer: &MockSigner, api: &MockVoteApi) -> Option<Toast> {
    match panel.request_vote() {
        VoteRequest::Submit(ticket) => {
            assert!(panel.is_loading());
            let outcome = submit_vote(signer, api, &ticket).await;
            panel.complete_submission(outcome)
        }
        other => panic!("expected submission, got {:?}", other),
    }
}

#[tokio::test]
async fn test_vote_accepted_resets_selection() {
    let api = MockVoteApi::responding(SubmitVoteResponse::accepted());
    let signer = MockSigner::new(SignBehavior::Sign);
    let mut panel = connected_panel_with_selection(&api, &signer).await;

    let toast = vote(&mut panel, &signer, &api).await.unwrap();

    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "Vote Success");
    assert_eq!(panel.selection(), None);
    assert!(!panel.is_loading());
    assert_eq!(
        api.submissions.lock().unwrap().as_slice(),
        &[(signer.address().to_string(), 5, 42)]
    );
    assert_eq!(signer.signed.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_vote_rejected_keeps_selection() {
    let api = MockVoteApi::responding(SubmitVoteResponse::rejected("closed"));
    let signer = MockSigner::new(SignBehavior::Sign);
    let mut panel = connected_panel_with_selection(&api, &signer).await;

    let toast = vote(&mut panel, &signer, &api).await.unwrap();

    assert_eq!(toast, Toast::error("closed"));
    assert_eq!(panel.selection(), Some(42));
    assert!(!panel.is_loading());
}

#[tokio::test]
async fn test_signing_failure_is_silent_and_skips_submission() {
    let api = MockVoteApi::responding(SubmitVoteResponse::accepted());
    let signer = MockSigner::new(SignBehavior::Fail);
    let mut panel = connected_panel_with_selection(&api, &signer).await;

    let toast = vote(&mut panel, &signer, &api).await;

    assert_eq!(toast, None);
    assert_eq!(panel.state(), PanelState::Selected(42));
    assert!(!panel.is_loading());
    assert_eq!(api.submission_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_is_silent() {
    let api = MockVoteApi::default();
    let signer = MockSigner::new(SignBehavior::Sign);
    let mut panel = connected_panel_with_selection(&api, &signer).await;

    let toast = vote(&mut panel, &signer, &api).await;

    assert_eq!(toast, None);
    assert_eq!(panel.selection(), Some(42));
    assert!(!panel.is_loading());
    assert_eq!(api.submission_count(), 1);
}

#[tokio::test]
async fn test_empty_signature_skips_submission() {
    let api = MockVoteApi::responding(SubmitVoteResponse::accepted());
    let signer = MockSigner::new(SignBehavior::Empty);
    let mut panel = connected_panel_with_selection(&api, &signer).await;

    let outcome = match panel.request_vote() {
        VoteRequest::Submit(ticket) => submit_vote(&signer, &api, &ticket).await,
        other => panic!("expected submission, got {:?}", other),
    };
    assert_eq!(outcome, SubmissionOutcome::Unsigned);
    assert_eq!(panel.complete_submission(outcome), None);
    assert_eq!(panel.selection(), Some(42));
    assert_eq!(api.submission_count(), 0);
}

#[tokio::test]
async fn test_vote_without_wallet_prompts_and_makes_no_calls() {
    let api = MockVoteApi::responding(SubmitVoteResponse::accepted());
    let mut panel = VotePanel::new(GameDescriptor::new(5, true), players());

    panel.select_candidate(42);
    assert_eq!(panel.request_vote(), VoteRequest::PromptConnect);
    assert!(panel.is_prompting());
    assert_eq!(api.call_count(), 0);

    // Connecting closes the prompt and only triggers the vote-info lookup
    let request = panel.wallet_changed(Some("5Grw")).unwrap();
    assert!(!panel.is_prompting());
    assert_eq!(panel.selection(), Some(42));
    assert_eq!(request.game_id, 5);
    assert_eq!(api.submission_count(), 0);
}

#[tokio::test]
async fn test_closed_voting_blocks_every_click() {
    let api = MockVoteApi::responding(SubmitVoteResponse::accepted());
    let mut panel = VotePanel::new(GameDescriptor::new(5, false), players());

    for candidate in players() {
        let toast = panel.select_candidate(candidate.id).unwrap();
        assert_eq!(toast.message, "It has not yet reached the voting stage.");
        assert_eq!(panel.selection(), None);
    }
    assert!(matches!(panel.request_vote(), VoteRequest::Blocked(_)));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_vote_with_real_wallet_signature() {
    let api = MockVoteApi::responding(SubmitVoteResponse::accepted());
    let wallet = Sr25519Wallet::from_uri("//Alice", 42).unwrap();
    let mut panel = VotePanel::new(GameDescriptor::new(9, true), players());

    panel.wallet_changed(Some(wallet.address()));
    panel.select_candidate(42);
    let VoteRequest::Submit(ticket) = panel.request_vote() else {
        panic!("expected submission");
    };
    let outcome = submit_vote(&wallet, &api, &ticket).await;
    assert_eq!(outcome, SubmissionOutcome::Accepted);
    assert_eq!(
        api.submissions.lock().unwrap()[0],
        ("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".to_string(), 9, 42)
    );
}
