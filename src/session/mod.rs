pub mod client;
pub mod recording;
pub mod types;
pub mod ws;

pub use client::{RoomSession, SessionError};
pub use recording::{OutboundCall, RecordingSession};
pub use types::{Position, SessionEvent, User};
pub use ws::WsRoomSession;
