use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::Config;

/// Identifier of a game participant
pub type CandidateId = u64;

/// Identifier of a game
pub type GameId = u64;

/// Wire value the vote service uses for an alive participant
pub const STATUS_ALIVE: i64 = 1;

/// Whether a participant can still receive votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum CandidateStatus {
    Alive,
    Dead,
}

impl From<i64> for CandidateStatus {
    fn from(value: i64) -> Self {
        if value == STATUS_ALIVE {
            CandidateStatus::Alive
        } else {
            CandidateStatus::Dead
        }
    }
}

impl From<CandidateStatus> for i64 {
    fn from(status: CandidateStatus) -> Self {
        match status {
            CandidateStatus::Alive => STATUS_ALIVE,
            CandidateStatus::Dead => 0,
        }
    }
}

impl Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateStatus::Alive => write!(f, "ALIVE"),
            CandidateStatus::Dead => write!(f, "DEAD"),
        }
    }
}

/// A game participant that can be voted for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "_id", deserialize_with = "deserialize_id")]
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub model: String,
    pub status: CandidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl Candidate {
    pub fn is_alive(&self) -> bool {
        self.status == CandidateStatus::Alive
    }

    /// Image location: `img` resolved against the configured base URL,
    /// or the fallback asset when the candidate has none
    pub fn image_url(&self, config: &Config) -> String {
        match self.img.as_deref() {
            Some(img) if !img.is_empty() => format!("{}{}", config.image_base_url, img),
            _ => config.fallback_image.clone(),
        }
    }
}

/// The game a panel is voting in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDescriptor {
    #[serde(rename = "_id", deserialize_with = "deserialize_id")]
    pub id: GameId,
    /// Whether the current phase accepts votes
    #[serde(rename = "isVoting", default)]
    pub voting_open: bool,
}

impl GameDescriptor {
    pub fn new(id: GameId, voting_open: bool) -> Self {
        Self { id, voting_open }
    }
}

/// Result of a vote-info lookup for (wallet address, game)
///
/// The service payload is kept as-is; nothing in the panel reads it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteInfo(pub serde_json::Value);

/// `data` part of a vote submission response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitVoteData {
    pub result: bool,
}

/// Response of the vote submission endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitVoteResponse {
    pub data: SubmitVoteData,
    #[serde(default)]
    pub msg: String,
}

impl SubmitVoteResponse {
    pub fn accepted() -> Self {
        Self {
            data: SubmitVoteData { result: true },
            msg: String::new(),
        }
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self {
            data: SubmitVoteData { result: false },
            msg: msg.into(),
        }
    }
}

/// Ids come over the wire either as numbers or as numeric strings
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_status_from_wire() {
        assert_eq!(CandidateStatus::from(1), CandidateStatus::Alive);
        assert_eq!(CandidateStatus::from(0), CandidateStatus::Dead);
        assert_eq!(CandidateStatus::from(2), CandidateStatus::Dead);
        assert_eq!(CandidateStatus::from(-1), CandidateStatus::Dead);
    }

    #[test]
    fn test_candidate_deserialize() {
        let json = r#"{"_id": 42, "name": "Ada", "model": "gpt-4o", "status": 1, "img": "/uploads/ada.png"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, 42);
        assert_eq!(candidate.name, "Ada");
        assert_eq!(candidate.model, "gpt-4o");
        assert!(candidate.is_alive());
        assert_eq!(candidate.img.as_deref(), Some("/uploads/ada.png"));
    }

    #[test]
    fn test_candidate_deserialize_string_id_and_dead_status() {
        let json = r#"{"_id": "7", "name": "Bob", "status": 3}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, 7);
        assert_eq!(candidate.status, CandidateStatus::Dead);
        assert!(candidate.img.is_none());
        assert!(candidate.model.is_empty());
    }

    #[test]
    fn test_candidate_deserialize_rejects_non_numeric_id() {
        let json = r#"{"_id": "abc", "name": "Bob", "status": 1}"#;
        assert!(serde_json::from_str::<Candidate>(json).is_err());
    }

    #[test]
    fn test_image_url_resolution() {
        let config = Config {
            image_base_url: "https://cdn.example.org".to_string(),
            ..Config::default()
        };
        let mut candidate = Candidate {
            id: 1,
            name: "Ada".to_string(),
            model: "m".to_string(),
            status: CandidateStatus::Alive,
            img: Some("/a.png".to_string()),
        };
        assert_eq!(candidate.image_url(&config), "https://cdn.example.org/a.png");

        candidate.img = None;
        assert_eq!(candidate.image_url(&config), "/img/ai.png");

        candidate.img = Some(String::new());
        assert_eq!(candidate.image_url(&config), "/img/ai.png");
    }

    #[test]
    fn test_game_descriptor_deserialize() {
        let game: GameDescriptor = serde_json::from_str(r#"{"_id": "12", "isVoting": true}"#).unwrap();
        assert_eq!(game, GameDescriptor::new(12, true));

        let game: GameDescriptor = serde_json::from_str(r#"{"_id": 3}"#).unwrap();
        assert!(!game.voting_open);
    }

    #[test]
    fn test_submit_vote_response_deserialize() {
        let res: SubmitVoteResponse =
            serde_json::from_str(r#"{"data": {"result": false}, "msg": "closed"}"#).unwrap();
        assert_eq!(res, SubmitVoteResponse::rejected("closed"));

        let res: SubmitVoteResponse = serde_json::from_str(r#"{"data": {"result": true}}"#).unwrap();
        assert_eq!(res, SubmitVoteResponse::accepted());
    }
}
