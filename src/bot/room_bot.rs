use std::sync::Arc;

use tracing::debug;

use crate::catalog::EmoteCatalog;
use crate::command::{Command, CommandClassifier};
use crate::emote_loop::EmoteLoopController;
use crate::greeter::{GreeterConfig, JoinGreeter, OwnerTracker};
use crate::phrases::{LinePicker, PhraseBook};
use crate::session::{RoomSession, SessionEvent, User};
use crate::shared::BotError;

/// The scripted room participant
///
/// Routes session events to the greeter and the chat-command path. Loop
/// state is mutated synchronously inside the handler, before any await that
/// could suspend past a state read.
pub struct RoomBot {
    session: Arc<dyn RoomSession>,
    classifier: CommandClassifier,
    emote_loops: EmoteLoopController,
    greeter: JoinGreeter,
    picker: LinePicker,
    owner: OwnerTracker,
}

impl RoomBot {
    pub fn new(
        session: Arc<dyn RoomSession>,
        catalog: Arc<EmoteCatalog>,
        phrases: PhraseBook,
        greeter_config: GreeterConfig,
        owner_id: impl Into<String>,
    ) -> Arc<Self> {
        let owner = OwnerTracker::new(owner_id);

        Arc::new(Self {
            classifier: CommandClassifier::new(catalog.clone()),
            emote_loops: EmoteLoopController::new(session.clone(), catalog),
            greeter: JoinGreeter::new(session.clone(), owner.clone(), greeter_config),
            picker: LinePicker::new(phrases),
            owner,
            session,
        })
    }

    /// Bot with the standard catalog, phrase book, and greeter config
    pub fn standard(session: Arc<dyn RoomSession>, owner_id: impl Into<String>) -> Arc<Self> {
        Self::new(
            session,
            Arc::new(EmoteCatalog::standard()),
            PhraseBook::standard(),
            GreeterConfig::default(),
            owner_id,
        )
    }

    pub async fn handle_event(&self, event: SessionEvent) -> Result<(), BotError> {
        match event {
            SessionEvent::UserJoined { user, position } => {
                self.greeter.handle_join(&user, position).await?;
            }
            SessionEvent::ChatMessage { user, text } => {
                self.handle_chat(&user, &text).await?;
            }
        }

        Ok(())
    }

    async fn handle_chat(&self, user: &User, text: &str) -> Result<(), BotError> {
        let command = self.classifier.classify(text);
        debug!(
            user_id = %user.id,
            command = command.kind(),
            "Classified chat message"
        );

        match command {
            Command::Pose => self.handle_pose(user).await?,
            Command::Stop => {
                self.emote_loops.stop_loop(&user.id).await;
            }
            Command::StartEmote { emote_id } => {
                self.emote_loops.start_loop(&user.id, &emote_id).await;
            }
            Command::Rizz { target } => {
                let target = target.unwrap_or_else(|| user.username.clone());
                self.session
                    .send_chat(&self.picker.rizz_line(&target))
                    .await?;
            }
            Command::Roast { target } => {
                let target = target.unwrap_or_else(|| user.username.clone());
                self.session
                    .send_chat(&self.picker.roast_line(&target))
                    .await?;
            }
            Command::NoOp => {}
        }

        Ok(())
    }

    /// Walk back to the owner's recorded position; owner-only
    async fn handle_pose(&self, user: &User) -> Result<(), BotError> {
        if !self.owner.is_owner(&user.id) {
            debug!(user_id = %user.id, "Ignoring pose from non-owner");
            return Ok(());
        }

        match self.owner.last_position().await {
            Some(position) => self.session.walk_to(position).await?,
            None => debug!("Owner position unknown, pose ignored"),
        }

        Ok(())
    }

    pub fn emote_loops(&self) -> &EmoteLoopController {
        &self.emote_loops
    }

    pub fn owner(&self) -> &OwnerTracker {
        &self.owner
    }
}
