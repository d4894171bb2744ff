use std::sync::Arc;

use crate::catalog::EmoteCatalog;

/// A classified chat command
///
/// The classifier is pure over the message text; actor-based rules (the
/// owner guard on `Pose`) are applied by the bot core.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pose,
    Stop,
    StartEmote { emote_id: String },
    Rizz { target: Option<String> },
    Roast { target: Option<String> },
    NoOp,
}

impl Command {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Pose => "pose",
            Command::Stop => "stop",
            Command::StartEmote { .. } => "start_emote",
            Command::Rizz { .. } => "rizz",
            Command::Roast { .. } => "roast",
            Command::NoOp => "no_op",
        }
    }
}

/// Parses raw chat text into a `Command`
///
/// Classification order is significant: pose, stop, emote catalog, rizz,
/// roast. A literal "stop" can never collide with an emote name because it
/// is matched before the catalog is consulted.
pub struct CommandClassifier {
    catalog: Arc<EmoteCatalog>,
}

impl CommandClassifier {
    pub fn new(catalog: Arc<EmoteCatalog>) -> Self {
        Self { catalog }
    }

    pub fn classify(&self, text: &str) -> Command {
        let msg = text.trim().to_lowercase();

        if msg.is_empty() {
            return Command::NoOp;
        }

        if msg == "pose" {
            return Command::Pose;
        }

        if msg == "0" || msg == "stop" {
            return Command::Stop;
        }

        if let Some(emote_id) = self.catalog.resolve(&msg) {
            return Command::StartEmote {
                emote_id: emote_id.to_string(),
            };
        }

        if msg.starts_with("rizz") {
            return Command::Rizz {
                target: second_token(&msg),
            };
        }

        if msg.starts_with("roast") {
            return Command::Roast {
                target: second_token(&msg),
            };
        }

        Command::NoOp
    }
}

fn second_token(msg: &str) -> Option<String> {
    msg.split_whitespace().nth(1).map(str::to_string)
}
