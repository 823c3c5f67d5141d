use crate::domain::{ChatId, UserId};

/// Cross-messenger incoming message.
///
/// Telegram-specific fields stay in the Telegram adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub username: Option<String>,
    pub content: MessageContent,
    /// Content of the message this one replies to, if any.
    pub reply_to: Option<MessageContent>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Photo {
        file_id: String,
        caption: Option<String>,
    },
    Voice {
        file_id: String,
    },
    Other,
}

/// Capabilities / limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_media: bool,
    pub max_message_len: usize,
}
