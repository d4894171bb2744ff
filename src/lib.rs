// Library crate for the hypebot room participant
// This file exposes the public API for integration tests

pub mod bot;
pub mod catalog;
pub mod command;
pub mod config;
pub mod emote_loop;
pub mod greeter;
pub mod phrases;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use bot::{EventDispatcher, RoomBot};
pub use catalog::{EmoteCatalog, EmoteDefinition};
pub use command::{Command, CommandClassifier};
pub use config::BotConfig;
pub use emote_loop::EmoteLoopController;
pub use greeter::{GreeterConfig, JoinGreeter, OwnerTracker};
pub use phrases::{LinePicker, PhraseBook};
pub use session::{RecordingSession, RoomSession, SessionError, SessionEvent};
pub use shared::BotError;
