use teloxide::types::Message;

use calcbot_core::{
    domain::{ChatId, UserId},
    messaging::types::{IncomingMessage, MessageContent},
};

/// Translate a Telegram message. Messages without a sender (channel posts)
/// are skipped.
pub fn to_incoming(msg: &Message) -> Option<IncomingMessage> {
    let user = msg.from()?;
    Some(IncomingMessage {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        content: content_of(msg),
        reply_to: msg.reply_to_message().map(content_of),
    })
}

/// Voice first, then the largest photo size, then text.
fn content_of(msg: &Message) -> MessageContent {
    if let Some(voice) = msg.voice() {
        return MessageContent::Voice {
            file_id: voice.file.id.clone(),
        };
    }
    if let Some(best) = msg.photo().and_then(|sizes| sizes.last()) {
        return MessageContent::Photo {
            file_id: best.file.id.clone(),
            caption: msg.caption().map(str::to_string),
        };
    }
    if let Some(text) = msg.text() {
        return MessageContent::Text(text.to_string());
    }
    MessageContent::Other
}
