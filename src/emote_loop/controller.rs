use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::EmoteCatalog;
use crate::session::RoomSession;

/// Registry entry for a user's running loop
#[derive(Debug, Clone)]
struct ActiveLoop {
    emote_id: String,
    ticket: Uuid,
}

/// Per-user looping-emote state machine
///
/// Each user owns at most one loop. `start_loop` installs a fresh ticket in
/// the registry and spawns a play/wait cycle; the cycle re-reads the registry
/// after every wait and keeps going only while its own ticket is still
/// installed. Stop and preemption are plain registry mutations, so a
/// superseded cycle exits on its next wake without playing again.
#[derive(Clone)]
pub struct EmoteLoopController {
    session: Arc<dyn RoomSession>,
    catalog: Arc<EmoteCatalog>,
    loops: Arc<RwLock<HashMap<String, ActiveLoop>>>,
}

impl EmoteLoopController {
    pub fn new(session: Arc<dyn RoomSession>, catalog: Arc<EmoteCatalog>) -> Self {
        Self {
            session,
            catalog,
            loops: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start (or replace) the looping emote for a user
    pub async fn start_loop(&self, user_id: &str, emote_id: &str) {
        let ticket = Uuid::new_v4();

        {
            let mut loops = self.loops.write().await;
            let replaced = loops.insert(
                user_id.to_string(),
                ActiveLoop {
                    emote_id: emote_id.to_string(),
                    ticket,
                },
            );
            if let Some(previous) = replaced {
                debug!(
                    user_id = %user_id,
                    previous_emote = %previous.emote_id,
                    "Replacing running emote loop"
                );
            }
        }

        info!(user_id = %user_id, emote_id = %emote_id, "Starting emote loop");

        let session = self.session.clone();
        let loops = self.loops.clone();
        let interval = self.catalog.duration_of(emote_id);
        let user_id = user_id.to_string();
        let emote_id = emote_id.to_string();

        tokio::spawn(async move {
            loop {
                if let Err(e) = session.send_emote(&emote_id, &user_id).await {
                    warn!(
                        user_id = %user_id,
                        emote_id = %emote_id,
                        error = %e,
                        "Emote play failed, ending loop"
                    );
                    let mut loops = loops.write().await;
                    if loops.get(&user_id).map(|l| l.ticket) == Some(ticket) {
                        loops.remove(&user_id);
                    }
                    break;
                }

                sleep(interval).await;

                // Re-check ownership after waking: a stop or a newer loop may
                // have changed the registry while this cycle was waiting.
                let loops = loops.read().await;
                if loops.get(&user_id).map(|l| l.ticket) != Some(ticket) {
                    debug!(
                        user_id = %user_id,
                        emote_id = %emote_id,
                        "Emote loop stopped or superseded, exiting"
                    );
                    break;
                }
            }
        });
    }

    /// Stop a user's loop; returns whether one was running
    pub async fn stop_loop(&self, user_id: &str) -> bool {
        let mut loops = self.loops.write().await;
        match loops.remove(user_id) {
            Some(active) => {
                info!(user_id = %user_id, emote_id = %active.emote_id, "Stopped emote loop");
                true
            }
            None => {
                debug!(user_id = %user_id, "Stop requested with no loop running");
                false
            }
        }
    }

    /// The emote currently looping for a user, if any
    pub async fn active_emote(&self, user_id: &str) -> Option<String> {
        let loops = self.loops.read().await;
        loops.get(user_id).map(|l| l.emote_id.clone())
    }

    /// Number of users with a running loop
    pub async fn active_loop_count(&self) -> usize {
        let loops = self.loops.read().await;
        loops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RecordingSession;
    use std::time::Duration;

    fn controller(session: &RecordingSession) -> EmoteLoopController {
        EmoteLoopController::new(
            Arc::new(session.clone()),
            Arc::new(EmoteCatalog::standard()),
        )
    }

    // "emote-wave" has a 3 second duration in the standard catalog; these
    // tests run on a paused clock so the cadence is deterministic.

    #[tokio::test(start_paused = true)]
    async fn test_loop_plays_immediately_then_repeats_on_cadence() {
        let session = RecordingSession::new();
        let controller = controller(&session);

        controller.start_loop("user-1", "emote-wave").await;
        sleep(Duration::from_millis(10)).await;

        assert_eq!(session.emote_plays().await.len(), 1);
        assert_eq!(
            controller.active_emote("user-1").await,
            Some("emote-wave".to_string())
        );

        sleep(Duration::from_secs(3)).await;
        assert_eq!(session.emote_plays().await.len(), 2);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(session.emote_plays().await.len(), 3);

        let plays = session.emote_plays().await;
        assert!(plays
            .iter()
            .all(|(emote, target)| emote == "emote-wave" && target == "user-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_loop_with_no_further_plays() {
        let session = RecordingSession::new();
        let controller = controller(&session);

        controller.start_loop("user-1", "emote-wave").await;
        sleep(Duration::from_millis(10)).await;
        assert_eq!(session.emote_plays().await.len(), 1);

        assert!(controller.stop_loop("user-1").await);
        assert_eq!(controller.active_emote("user-1").await, None);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(session.emote_plays().await.len(), 1);
    }

    #[tokio::test]
    async fn test_stop_without_running_loop_returns_false() {
        let session = RecordingSession::new();
        let controller = controller(&session);

        assert!(!controller.stop_loop("user-1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_emote_preempts_running_loop() {
        let session = RecordingSession::new();
        let controller = controller(&session);

        controller.start_loop("user-1", "emote-wave").await;
        sleep(Duration::from_millis(10)).await;

        controller.start_loop("user-1", "emote-bow").await;
        sleep(Duration::from_millis(10)).await;

        // The replacement plays immediately.
        let plays = session.emote_plays().await;
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[1].0, "emote-bow");
        assert_eq!(
            controller.active_emote("user-1").await,
            Some("emote-bow".to_string())
        );

        // The superseded wave cycle never plays again.
        sleep(Duration::from_secs(30)).await;
        let wave_plays = session
            .emote_plays()
            .await
            .iter()
            .filter(|(emote, _)| emote == "emote-wave")
            .count();
        assert_eq!(wave_plays, 1);
        assert_eq!(controller.active_loop_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loops_for_different_users_are_independent() {
        let session = RecordingSession::new();
        let controller = controller(&session);

        controller.start_loop("user-1", "emote-wave").await;
        controller.start_loop("user-2", "emote-bow").await;
        sleep(Duration::from_millis(10)).await;

        assert_eq!(controller.active_loop_count().await, 2);

        assert!(controller.stop_loop("user-1").await);
        sleep(Duration::from_secs(30)).await;

        assert_eq!(controller.active_emote("user-1").await, None);
        assert_eq!(
            controller.active_emote("user-2").await,
            Some("emote-bow".to_string())
        );

        let wave_plays = session
            .emote_plays()
            .await
            .iter()
            .filter(|(emote, _)| emote == "emote-wave")
            .count();
        assert_eq!(wave_plays, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_failure_terminates_loop() {
        let session = RecordingSession::new();
        let controller = controller(&session);
        session.set_fail_sends(true).await;

        controller.start_loop("user-1", "emote-wave").await;
        sleep(Duration::from_millis(10)).await;

        assert!(session.emote_plays().await.is_empty());
        assert_eq!(controller.active_emote("user-1").await, None);
    }
}
