use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::client::{RoomSession, SessionError};
use super::types::{Position, SessionEvent, User};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Client-to-server frames
#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum WireOut<'a> {
    Auth { room_id: &'a str, token: &'a str },
    Chat { text: &'a str },
    Emote { emote_id: &'a str, target_user_id: &'a str },
    Walk { position: Position },
}

/// Server-to-client frames
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum WireIn {
    AuthOk { session_id: String },
    AuthFailed { reason: String },
    UserJoined { user: User, position: Position },
    Chat { user: User, text: String },
}

/// WebSocket-backed room session
///
/// `connect` performs the auth handshake and hands back the outbound half
/// plus a channel of inbound `SessionEvent`s fed by a background reader task.
/// The receiver closing means the connection is gone; the caller decides
/// whether to reconnect.
pub struct WsRoomSession {
    sink: Mutex<SplitSink<WsStream, Message>>,
}

impl WsRoomSession {
    pub async fn connect(
        server_url: &str,
        room_id: &str,
        token: &str,
    ) -> Result<(Self, mpsc::Receiver<SessionEvent>), SessionError> {
        info!(server_url = %server_url, room_id = %room_id, "Connecting to room service");

        let (ws, _) = connect_async(server_url)
            .await
            .map_err(|e| SessionError::Connection(e.to_string()))?;
        let (mut sink, mut stream) = ws.split();

        let auth = serde_json::to_string(&WireOut::Auth { room_id, token })
            .map_err(|e| SessionError::Connection(e.to_string()))?;
        sink.send(Message::Text(auth))
            .await
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        let session_id = await_auth(&mut stream).await?;
        info!(session_id = %session_id, "Authenticated with room service");

        let (tx, rx) = mpsc::channel(100);
        tokio::spawn(read_events(stream, tx));

        Ok((
            Self {
                sink: Mutex::new(sink),
            },
            rx,
        ))
    }

    async fn send(&self, frame: &WireOut<'_>) -> Result<(), SessionError> {
        let text = serde_json::to_string(frame).map_err(|e| SessionError::Send(e.to_string()))?;
        let mut sink = self.sink.lock().await;
        sink.send(Message::Text(text))
            .await
            .map_err(|e| SessionError::Send(e.to_string()))
    }
}

#[async_trait]
impl RoomSession for WsRoomSession {
    async fn send_chat(&self, text: &str) -> Result<(), SessionError> {
        self.send(&WireOut::Chat { text }).await
    }

    async fn send_emote(&self, emote_id: &str, target_user_id: &str) -> Result<(), SessionError> {
        self.send(&WireOut::Emote {
            emote_id,
            target_user_id,
        })
        .await
    }

    async fn walk_to(&self, position: Position) -> Result<(), SessionError> {
        self.send(&WireOut::Walk { position }).await
    }
}

/// Wait for the auth verdict, skipping any frames that precede it
async fn await_auth(stream: &mut SplitStream<WsStream>) -> Result<String, SessionError> {
    while let Some(frame) = stream.next().await {
        let frame = frame.map_err(|e| SessionError::Connection(e.to_string()))?;
        let Message::Text(text) = frame else { continue };

        match serde_json::from_str::<WireIn>(&text) {
            Ok(WireIn::AuthOk { session_id }) => return Ok(session_id),
            Ok(WireIn::AuthFailed { reason }) => return Err(SessionError::Auth(reason)),
            _ => continue,
        }
    }

    Err(SessionError::Connection(
        "connection closed during authentication".to_string(),
    ))
}

async fn read_events(mut stream: SplitStream<WsStream>, tx: mpsc::Sender<SessionEvent>) {
    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "WebSocket read failed");
                break;
            }
        };

        let text = match frame {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let wire: WireIn = match serde_json::from_str(&text) {
            Ok(wire) => wire,
            Err(_) => {
                debug!(frame = %text, "Skipping unrecognized frame");
                continue;
            }
        };

        let event = match wire {
            WireIn::UserJoined { user, position } => SessionEvent::UserJoined { user, position },
            WireIn::Chat { user, text } => SessionEvent::ChatMessage { user, text },
            WireIn::AuthOk { .. } | WireIn::AuthFailed { .. } => continue,
        };

        if tx.send(event).await.is_err() {
            break;
        }
    }

    info!("Room event stream closed");
}
