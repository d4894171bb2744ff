use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::room_bot::RoomBot;
use crate::session::SessionEvent;

/// Feeds session events to the bot, one task per event
///
/// Spawning per event isolates handlers from each other: a handler that
/// sleeps (the greeter's arrival sequence, a loop cycle) or fails never
/// blocks the rest of the stream. Errors are logged, not propagated; the
/// run ends when the event stream closes.
pub struct EventDispatcher {
    bot: Arc<RoomBot>,
}

impl EventDispatcher {
    pub fn new(bot: Arc<RoomBot>) -> Self {
        Self { bot }
    }

    pub async fn run(self, mut events: mpsc::Receiver<SessionEvent>) {
        info!("Event dispatcher started");

        while let Some(event) = events.recv().await {
            debug!(event_type = event.event_type(), "Dispatching session event");

            let bot = self.bot.clone();
            tokio::spawn(async move {
                if let Err(e) = bot.handle_event(event).await {
                    error!(error = %e, "Event handler failed");
                }
            });
        }

        info!("Session event stream closed, dispatcher stopping");
    }
}
