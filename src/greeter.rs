use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::session::{Position, RoomSession, SessionError, User};

#[derive(Debug, Clone, Default)]
struct OwnerPresence {
    position: Option<Position>,
    arrived_at: Option<DateTime<Utc>>,
}

/// Tracks the owner identity and their last known position
///
/// Written by the greeter on every owner join, read by the `pose` command.
#[derive(Clone)]
pub struct OwnerTracker {
    owner_id: String,
    presence: Arc<RwLock<OwnerPresence>>,
}

impl OwnerTracker {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            presence: Arc::new(RwLock::new(OwnerPresence::default())),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        user_id == self.owner_id
    }

    pub async fn record_arrival(&self, position: Position) {
        let mut presence = self.presence.write().await;
        let previous = presence.arrived_at.replace(Utc::now());
        presence.position = Some(position);

        if let Some(previous) = previous {
            debug!(last_arrival = %previous, "Owner returned to the room");
        }
    }

    pub async fn last_position(&self) -> Option<Position> {
        self.presence.read().await.position
    }

    pub async fn last_arrival(&self) -> Option<DateTime<Utc>> {
        self.presence.read().await.arrived_at
    }
}

/// Configuration for the join greeter
#[derive(Debug, Clone)]
pub struct GreeterConfig {
    /// Announcement sent when the owner joins; `{username}` is substituted
    pub owner_announcement: String,
    /// Emotes played at the owner after the announcement, in order
    pub arrival_emotes: Vec<String>,
    /// Delay between consecutive arrival emotes
    pub arrival_emote_delay: Duration,
    /// Greeting templates for everyone else; `{username}` is substituted
    pub greetings: Vec<String>,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        Self {
            owner_announcement:
                "⚡ Attention everyone! Our owner @{username} just entered the room! Show some love 👑✨"
                    .to_string(),
            arrival_emotes: vec![
                "emote-bow".to_string(),
                "emote-curtsy".to_string(),
                "emoji-gagging".to_string(),
            ],
            arrival_emote_delay: Duration::from_secs(2),
            greetings: vec![
                "@{username} looking good today ✨✌🏼".to_string(),
                "Welcome @{username}! We’ve been waiting for you 😎".to_string(),
                "Hey @{username}, glad you joined 🎉".to_string(),
                "@{username} just pulled up 🔥".to_string(),
                "@{username}, the party’s better with you here 🥳".to_string(),
                "Everyone say hi to @{username}! 👋".to_string(),
                "@{username}, you’re glowing today 🌟".to_string(),
                "Welcome in, @{username}! Make yourself at home 🏠".to_string(),
                "@{username} joined the vibe train 🚂✨".to_string(),
                "Finally! @{username} is here 😏".to_string(),
            ],
        }
    }
}

/// Reacts to join events
///
/// The owner gets an announcement plus a sequenced arrival-emote routine;
/// everyone else gets one random greeting. The delays in the owner routine
/// are plain sleeps; the dispatcher runs each event in its own task, so
/// other events are handled while they elapse.
pub struct JoinGreeter {
    session: Arc<dyn RoomSession>,
    owner: OwnerTracker,
    config: GreeterConfig,
}

impl JoinGreeter {
    pub fn new(session: Arc<dyn RoomSession>, owner: OwnerTracker, config: GreeterConfig) -> Self {
        Self {
            session,
            owner,
            config,
        }
    }

    pub async fn handle_join(&self, user: &User, position: Position) -> Result<(), SessionError> {
        if self.owner.is_owner(&user.id) {
            self.greet_owner(user, position).await
        } else {
            self.greet_visitor(user).await
        }
    }

    async fn greet_owner(&self, user: &User, position: Position) -> Result<(), SessionError> {
        self.owner.record_arrival(position).await;
        info!(user_id = %user.id, username = %user.username, "Owner joined the room");

        let announcement = self
            .config
            .owner_announcement
            .replace("{username}", &user.username);
        self.session.send_chat(&announcement).await?;

        for (index, emote_id) in self.config.arrival_emotes.iter().enumerate() {
            if index > 0 {
                sleep(self.config.arrival_emote_delay).await;
            }
            self.session.send_emote(emote_id, &user.id).await?;
        }

        Ok(())
    }

    async fn greet_visitor(&self, user: &User) -> Result<(), SessionError> {
        let Some(template) = self.config.greetings.choose(&mut rand::rng()) else {
            return Ok(());
        };

        let greeting = template.replace("{username}", &user.username);
        debug!(user_id = %user.id, username = %user.username, "Greeting visitor");
        self.session.send_chat(&greeting).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{OutboundCall, RecordingSession};

    fn user(id: &str, username: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
        }
    }

    fn position() -> Position {
        Position {
            x: 1.0,
            y: 0.0,
            z: 2.0,
        }
    }

    fn greeter(session: &RecordingSession, owner_id: &str) -> JoinGreeter {
        JoinGreeter::new(
            Arc::new(session.clone()),
            OwnerTracker::new(owner_id),
            GreeterConfig::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_owner_join_announces_then_plays_arrival_sequence() {
        let session = RecordingSession::new();
        let greeter = greeter(&session, "owner-1");

        greeter
            .handle_join(&user("owner-1", "roomboss"), position())
            .await
            .unwrap();

        let calls = session.calls().await;
        assert_eq!(calls.len(), 4);
        assert!(matches!(
            &calls[0],
            OutboundCall::Chat { text } if text.contains("@roomboss")
        ));
        assert_eq!(
            session.emote_plays().await,
            vec![
                ("emote-bow".to_string(), "owner-1".to_string()),
                ("emote-curtsy".to_string(), "owner-1".to_string()),
                ("emoji-gagging".to_string(), "owner-1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_owner_join_records_position_and_arrival_time() {
        let session = RecordingSession::new();
        let owner = OwnerTracker::new("owner-1");
        let greeter = JoinGreeter::new(
            Arc::new(session.clone()),
            owner.clone(),
            GreeterConfig {
                arrival_emote_delay: Duration::from_millis(1),
                ..GreeterConfig::default()
            },
        );

        greeter
            .handle_join(&user("owner-1", "roomboss"), position())
            .await
            .unwrap();

        assert_eq!(owner.last_position().await, Some(position()));
        assert!(owner.last_arrival().await.is_some());
    }

    #[tokio::test]
    async fn test_visitor_join_sends_one_greeting_with_username() {
        let session = RecordingSession::new();
        let greeter = greeter(&session, "owner-1");

        greeter
            .handle_join(&user("user-2", "alice"), position())
            .await
            .unwrap();

        let calls = session.calls().await;
        assert_eq!(calls.len(), 1);
        let chats = session.chat_messages().await;
        assert!(chats[0].contains("alice"));
        assert!(session.emote_plays().await.is_empty());
    }

    #[tokio::test]
    async fn test_visitor_greeting_comes_from_the_template_set() {
        let session = RecordingSession::new();
        let greeter = greeter(&session, "owner-1");

        greeter
            .handle_join(&user("user-2", "alice"), position())
            .await
            .unwrap();

        let greeting = &session.chat_messages().await[0];
        let matches_template = GreeterConfig::default()
            .greetings
            .iter()
            .any(|t| &t.replace("{username}", "alice") == greeting);
        assert!(matches_template, "unexpected greeting: {}", greeting);
    }

    #[test]
    fn test_owner_tracker_identifies_owner() {
        let owner = OwnerTracker::new("owner-1");

        assert!(owner.is_owner("owner-1"));
        assert!(!owner.is_owner("user-2"));
        assert_eq!(owner.owner_id(), "owner-1");
    }
}
