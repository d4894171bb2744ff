use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::client::{RoomSession, SessionError};
use super::types::Position;

/// An outbound call captured by the recording session
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundCall {
    Chat {
        text: String,
    },
    Emote {
        emote_id: String,
        target_user_id: String,
    },
    Walk {
        position: Position,
    },
}

/// In-memory `RoomSession` that records every outbound call
///
/// This double does nothing but capture calls and can be used in tests
/// where you need a session but don't want a live connection.
#[derive(Clone, Default)]
pub struct RecordingSession {
    calls: Arc<RwLock<Vec<OutboundCall>>>,
    fail_sends: Arc<RwLock<bool>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with a `SessionError::Send`
    pub async fn set_fail_sends(&self, fail: bool) {
        *self.fail_sends.write().await = fail;
    }

    /// All calls recorded so far, in order
    pub async fn calls(&self) -> Vec<OutboundCall> {
        self.calls.read().await.clone()
    }

    /// Only the chat messages, in order
    pub async fn chat_messages(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                OutboundCall::Chat { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Only the emote plays, as (emote_id, target_user_id) pairs, in order
    pub async fn emote_plays(&self) -> Vec<(String, String)> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|call| match call {
                OutboundCall::Emote {
                    emote_id,
                    target_user_id,
                } => Some((emote_id.clone(), target_user_id.clone())),
                _ => None,
            })
            .collect()
    }

    pub async fn clear(&self) {
        self.calls.write().await.clear();
    }

    async fn record(&self, call: OutboundCall) -> Result<(), SessionError> {
        if *self.fail_sends.read().await {
            return Err(SessionError::Send("injected send failure".to_string()));
        }
        self.calls.write().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl RoomSession for RecordingSession {
    async fn send_chat(&self, text: &str) -> Result<(), SessionError> {
        self.record(OutboundCall::Chat {
            text: text.to_string(),
        })
        .await
    }

    async fn send_emote(&self, emote_id: &str, target_user_id: &str) -> Result<(), SessionError> {
        self.record(OutboundCall::Emote {
            emote_id: emote_id.to_string(),
            target_user_id: target_user_id.to_string(),
        })
        .await
    }

    async fn walk_to(&self, position: Position) -> Result<(), SessionError> {
        self.record(OutboundCall::Walk { position }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let session = RecordingSession::new();

        session.send_chat("hello").await.unwrap();
        session.send_emote("emote-bow", "user-1").await.unwrap();

        let calls = session.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            OutboundCall::Chat {
                text: "hello".to_string()
            }
        );
        assert_eq!(
            session.emote_plays().await,
            vec![("emote-bow".to_string(), "user-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_injected_failures_record_nothing() {
        let session = RecordingSession::new();
        session.set_fail_sends(true).await;

        let result = session.send_chat("hello").await;

        assert!(matches!(result, Err(SessionError::Send(_))));
        assert!(session.calls().await.is_empty());
    }
}
