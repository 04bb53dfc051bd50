//! Client for the remote vote service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::Config;
use crate::error::{LiveVoteError, Result};
use crate::primitives::{
    Candidate, CandidateId, GameDescriptor, GameId, SubmitVoteResponse, VoteInfo,
};

/// Default timeout for vote service requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for talking to the vote service - enables mocking in tests
#[async_trait]
pub trait VoteApi: Send + Sync {
    /// Look up what the service knows about `address`'s vote in a game
    async fn get_vote_info(&self, address: &str, game_id: GameId) -> Result<Option<VoteInfo>>;

    /// Submit a vote for `candidate_id`
    async fn submit_vote(
        &self,
        address: &str,
        game_id: GameId,
        candidate_id: CandidateId,
    ) -> Result<SubmitVoteResponse>;

    /// Load the game descriptor, including whether voting is open
    async fn get_game(&self, game_id: GameId) -> Result<GameDescriptor>;

    /// Load the participants of a game
    async fn get_players(&self, game_id: GameId) -> Result<Vec<Candidate>>;
}

/// Standard `{ data, msg }` envelope the service wraps payloads in
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    msg: String,
}

impl<T> Envelope<T> {
    fn into_required(self, what: &str) -> Result<T> {
        self.data.ok_or_else(|| {
            if self.msg.is_empty() {
                LiveVoteError::Api(format!("{} missing from response", what))
            } else {
                LiveVoteError::Api(self.msg)
            }
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitVoteRequest<'a> {
    address: &'a str,
    game_id: GameId,
    player_id: CandidateId,
}

/// HTTP implementation of [`VoteApi`]
///
/// Endpoints, relative to `api_url`:
/// - `GET  /vote/info?address=..&gameId=..`
/// - `POST /vote/submit` with `{ address, gameId, playerId }`
/// - `GET  /game/{id}`
/// - `GET  /player/list?gameId=..`
#[derive(Clone)]
pub struct HttpVoteApi {
    http: reqwest::Client,
    api_url: String,
}

impl HttpVoteApi {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(LiveVoteError::Api(format!("HTTP status {}", status)));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl VoteApi for HttpVoteApi {
    async fn get_vote_info(&self, address: &str, game_id: GameId) -> Result<Option<VoteInfo>> {
        let response = self
            .http
            .get(self.endpoint("vote/info"))
            .query(&[("address", address.to_string()), ("gameId", game_id.to_string())])
            .send()
            .await?;
        let envelope: Envelope<VoteInfo> = Self::read_json(response).await?;
        Ok(envelope.data.filter(|info| !info.0.is_null()))
    }

    async fn submit_vote(
        &self,
        address: &str,
        game_id: GameId,
        candidate_id: CandidateId,
    ) -> Result<SubmitVoteResponse> {
        let body = SubmitVoteRequest {
            address,
            game_id,
            player_id: candidate_id,
        };
        let response = self
            .http
            .post(self.endpoint("vote/submit"))
            .json(&body)
            .send()
            .await?;
        let res: SubmitVoteResponse = Self::read_json(response).await?;
        log::info!(
            "Vote for player {} in game {} by {}: result={}",
            candidate_id,
            game_id,
            address,
            res.data.result
        );
        Ok(res)
    }

    async fn get_game(&self, game_id: GameId) -> Result<GameDescriptor> {
        let response = self
            .http
            .get(self.endpoint(&format!("game/{}", game_id)))
            .send()
            .await?;
        let envelope: Envelope<GameDescriptor> = Self::read_json(response).await?;
        envelope.into_required("game")
    }

    async fn get_players(&self, game_id: GameId) -> Result<Vec<Candidate>> {
        let response = self
            .http
            .get(self.endpoint("player/list"))
            .query(&[("gameId", game_id.to_string())])
            .send()
            .await?;
        let envelope: Envelope<Vec<Candidate>> = Self::read_json(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}
