use crate::shared::BotError;

/// Local dev gateway; override with ROOM_SERVER_URL
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:4100/room";

/// Environment-provided bot configuration
///
/// There is no CLI surface; the bot reads its room, token, and owner
/// identity from the environment once at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub server_url: String,
    pub room_id: String,
    pub api_token: String,
    /// Distinguished user granted the arrival routine and the pose command;
    /// falls back to the room id when OWNER_ID is unset
    pub owner_id: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, BotError> {
        let room_id = require_env("ROOM_ID")?;
        let api_token = require_env("BOT_TOKEN")?;

        let owner_id = optional_env("OWNER_ID").unwrap_or_else(|| room_id.clone());
        let server_url =
            optional_env("ROOM_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Ok(Self {
            server_url,
            room_id,
            api_token,
            owner_id,
        })
    }
}

fn require_env(key: &str) -> Result<String, BotError> {
    optional_env(key).ok_or_else(|| BotError::Config(format!("{} must be set", key)))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
