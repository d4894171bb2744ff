use async_trait::async_trait;
use thiserror::Error;

use super::types::Position;

/// Errors from the room-session boundary
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("send failed: {0}")]
    Send(String),
}

/// Outbound primitives of a connected room session
///
/// The bot core only talks to the room service through this trait, so tests
/// can swap in a recording double and the wire client stays replaceable.
#[async_trait]
pub trait RoomSession: Send + Sync {
    /// Broadcast a chat message to the room
    async fn send_chat(&self, text: &str) -> Result<(), SessionError>;

    /// Play an emote on a target user
    async fn send_emote(&self, emote_id: &str, target_user_id: &str) -> Result<(), SessionError>;

    /// Walk the bot to a position in the room
    async fn walk_to(&self, position: Position) -> Result<(), SessionError>;
}
