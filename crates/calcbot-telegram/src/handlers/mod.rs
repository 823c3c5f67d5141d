//! Telegram update handlers.
//!
//! Updates are translated into core `IncomingMessage`s and handed to the
//! shared `BotService`; nothing here keeps per-user state.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::warn;

use crate::router::AppState;

mod convert;

pub use convert::to_incoming;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(incoming) = to_incoming(&msg) else {
        return Ok(());
    };
    let user_id = incoming.user_id.0;

    if let Err(e) = state.service.handle(incoming).await {
        warn!(user_id, chat_id = msg.chat.id.0, error = %e, "failed to handle message");
    }

    Ok(())
}
