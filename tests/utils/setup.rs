//! Test setup helpers - wire a full bot to a recording session
#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;
use std::time::Duration;

use hypebot::session::{Position, RecordingSession, SessionEvent, User};
use hypebot::{EmoteCatalog, EventDispatcher, GreeterConfig, PhraseBook, RoomBot};
use tokio::sync::mpsc;

pub const OWNER_ID: &str = "owner-1";
pub const OWNER_NAME: &str = "roomboss";

/// A running bot fed through an in-memory event channel, recording all
/// outbound calls
pub struct TestSetup {
    pub session: RecordingSession,
    pub bot: Arc<RoomBot>,
    events: mpsc::Sender<SessionEvent>,
}

impl TestSetup {
    pub async fn start() -> Self {
        Self::start_with_arrival_delay(Duration::from_millis(60)).await
    }

    pub async fn start_with_arrival_delay(arrival_emote_delay: Duration) -> Self {
        let session = RecordingSession::new();
        let greeter_config = GreeterConfig {
            arrival_emote_delay,
            ..GreeterConfig::default()
        };

        let bot = RoomBot::new(
            Arc::new(session.clone()),
            Arc::new(EmoteCatalog::standard()),
            PhraseBook::standard(),
            greeter_config,
            OWNER_ID,
        );

        let (events, receiver) = mpsc::channel(100);
        tokio::spawn(EventDispatcher::new(bot.clone()).run(receiver));

        Self {
            session,
            bot,
            events,
        }
    }

    pub async fn join(&self, user: &User, position: Position) {
        self.events
            .send(SessionEvent::UserJoined {
                user: user.clone(),
                position,
            })
            .await
            .expect("dispatcher should be running");
    }

    pub async fn chat(&self, user: &User, text: &str) {
        self.events
            .send(SessionEvent::ChatMessage {
                user: user.clone(),
                text: text.to_string(),
            })
            .await
            .expect("dispatcher should be running");
    }

    /// Give in-flight handlers a moment to run
    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}

pub fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
    }
}

pub fn owner() -> User {
    user(OWNER_ID, OWNER_NAME)
}

pub fn position(x: f64, z: f64) -> Position {
    Position { x, y: 0.0, z }
}
