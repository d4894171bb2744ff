use thiserror::Error;

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
