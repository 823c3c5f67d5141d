use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::info;

use calcbot_core::{
    bot::BotService, config::Config, messaging::port::MessagingPort, notes::NoteStore,
};

use crate::handlers;
use crate::TelegramMessenger;

/// Shared state handed to every handler by the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BotService>,
}

pub async fn run_polling(cfg: Arc<Config>, notes: Arc<NoteStore>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        info!(username = %me.username(), "bot authorized");
    }
    info!(notes_file = %notes.path().display(), "note store ready");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let service = Arc::new(BotService::new(cfg, notes, messenger));
    let state = Arc::new(AppState { service });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
