use serde::{Deserialize, Serialize};

/// A user present in the room, as reported by the room service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// A position on the room floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Inbound events delivered by the room session
///
/// Events represent facts about things that have already happened in the
/// room. The bot never polls; it reacts to this stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A user has entered the room
    UserJoined { user: User, position: Position },

    /// A user has sent a chat message
    ChatMessage { user: User, text: String },
}

impl SessionEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::UserJoined { .. } => "user_joined",
            SessionEvent::ChatMessage { .. } => "chat_message",
        }
    }
}
