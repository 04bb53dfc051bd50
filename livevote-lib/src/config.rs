use serde::{Deserialize, Serialize};

use crate::error::{LiveVoteError, Result};

/// Generic Substrate SS58 prefix, used for wallet addresses by default
pub const DEFAULT_SS58_PREFIX: u16 = 42;

/// Configuration for the live vote panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the vote service
    /// e.g., "http://127.0.0.1:8080/api"
    pub api_url: String,

    /// Base URL candidate image paths are resolved against
    pub image_base_url: String,

    /// Asset shown for candidates without an image
    pub fallback_image: String,

    /// Game whose participants are shown
    pub game_id: u64,

    /// SS58 prefix used to display the wallet address
    pub ss58_prefix: u16,

    /// How long a toast stays on screen
    pub toast_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8080/api".to_string(),
            image_base_url: "http://127.0.0.1:8080".to_string(),
            fallback_image: "/img/ai.png".to_string(),
            game_id: 1,
            ss58_prefix: DEFAULT_SS58_PREFIX,
            toast_duration_ms: 4000,
        }
    }
}

impl Config {
    pub fn new(api_url: String, image_base_url: String, game_id: u64) -> Self {
        Self {
            api_url,
            image_base_url,
            game_id,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| LiveVoteError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(LiveVoteError::Config("api_url must not be empty".to_string()));
        }
        if self.ss58_prefix > 16383 {
            return Err(LiveVoteError::Config(format!(
                "ss58_prefix {} out of range",
                self.ss58_prefix
            )));
        }
        Ok(())
    }
}
