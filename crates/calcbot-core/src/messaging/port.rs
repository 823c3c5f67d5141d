use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::MessagingCapabilities,
    Result,
};

/// Outbound side of a messenger.
///
/// Media is re-sent by the messenger's own file id; nothing is downloaded.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;

    async fn send_photo(&self, chat_id: ChatId, file_id: &str, caption: &str)
        -> Result<MessageRef>;

    async fn send_voice(&self, chat_id: ChatId, file_id: &str, caption: &str)
        -> Result<MessageRef>;
}
