use std::sync::Arc;
use std::time::Duration;

use hypebot::session::WsRoomSession;
use hypebot::{BotConfig, BotError, EventDispatcher, RoomBot};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hypebot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(2);
        }
    };

    info!(
        room_id = %config.room_id,
        owner_id = %config.owner_id,
        server_url = %config.server_url,
        "Starting hypebot"
    );

    // Run until killed; reconnect after the session drops.
    loop {
        match run_session(&config).await {
            Ok(()) => warn!("Session closed, reconnecting"),
            Err(e) => warn!(error = %e, "Session ended with error, reconnecting"),
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}

async fn run_session(config: &BotConfig) -> Result<(), BotError> {
    let (session, events) =
        WsRoomSession::connect(&config.server_url, &config.room_id, &config.api_token).await?;

    let bot = RoomBot::standard(Arc::new(session), config.owner_id.clone());
    EventDispatcher::new(bot).run(events).await;

    Ok(())
}
