use serde::{Deserialize, Serialize};

use crate::messaging::types::MessageContent;

/// What a note holds. Serialized as JSON, then encrypted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NotePayload {
    Text {
        text: String,
    },
    Photo {
        file_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Voice {
        file_id: String,
    },
}

impl NotePayload {
    /// Voice first, then photo, then non-blank text.
    pub fn from_content(content: &MessageContent) -> Option<Self> {
        match content {
            MessageContent::Voice { file_id } => Some(Self::Voice {
                file_id: file_id.clone(),
            }),
            MessageContent::Photo { file_id, caption } => Some(Self::Photo {
                file_id: file_id.clone(),
                caption: caption.clone().filter(|c| !c.trim().is_empty()),
            }),
            MessageContent::Text(text) if !text.trim().is_empty() => Some(Self::Text {
                text: text.clone(),
            }),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Photo { .. } => "photo",
            Self::Voice { .. } => "voice",
        }
    }
}
