use teloxide::adaptors::throttle::Limits;
use teloxide::adaptors::Throttle;
use teloxide::prelude::*;
use teloxide::Bot;

use crate::config::AppConfig;
use crate::error::{BotResult, HandlerResult};
use crate::handler::get_handler;
use crate::state::AppState;
use crate::utils::http;

/// The client must come from teloxide's own reqwest settings, which may be a different reqwest
/// version than the one the rest of the crate uses.
fn telegram_bot(token: &str) -> BotResult<Throttle<Bot>> {
    let client = teloxide::net::default_reqwest_settings()
        .user_agent(http::DEFAULT_USER_AGENT)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build Telegram HTTP client: {}", e))?;

    Ok(Bot::with_client(token, client).throttle(Limits::default()))
}

pub struct BotService {
    pub bot: Throttle<Bot>,
    pub state: AppState,
}

impl BotService {
    pub async fn new(config: &AppConfig) -> BotResult<Self> {
        info!("Initializing AppState...");
        let state = AppState::new(config).await?;
        info!("AppState initialized");

        let bot = telegram_bot(&config.telegram.0)?;

        Ok(Self { bot, state })
    }

    pub async fn start(&self) -> HandlerResult<()> {
        info!("Testing connection to Telegram API...");
        match self.bot.get_me().await {
            Ok(me) => info!("Successfully connected to Telegram API as @{}", me.username()),
            Err(e) => {
                error!("Failed to connect to Telegram API: {:?}", e);
                return Err(anyhow::anyhow!("Failed to connect to Telegram API: {}", e).into());
            }
        }

        let bot = self.bot.clone();

        if let Err(e) = crate::command::setup_user_commands(&bot).await {
            warn!("Failed to register bot commands: {}", e);
        }

        Dispatcher::builder(bot, get_handler())
            .dependencies(dptree::deps![self.state.clone()])
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
