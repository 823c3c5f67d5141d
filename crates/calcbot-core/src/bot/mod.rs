//! Stateless command layer shared by messenger adapters.
//!
//! Every incoming message is handled on its own: there are no menus and no
//! per-user modes, so adapters only need to translate messages and forward
//! them to [`BotService::handle`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    calc,
    config::Config,
    domain::{ChatId, NoteId},
    errors::Error,
    formatting::{format_note_list, note_header, truncate_text},
    messaging::{
        port::MessagingPort,
        types::{IncomingMessage, MessageContent},
    },
    notes::{NotePayload, NoteStore},
    Result,
};

pub mod commands;

pub use commands::{parse_command, Command};

pub const HELP_TEXT: &str = "Send an expression like 2*(3+4)/5 and I'll calculate it.\n\
\n\
/calc <expr> - calculate an expression\n\
/note <text> - save a note (or reply /note to a text, photo or voice message)\n\
/notes - list your notes\n\
/read <id> - open a note";

const CALC_USAGE: &str = "Send an expression, for example: /calc 2*(3+4)/5";
const NOTE_USAGE: &str =
    "Send /note <text>, or reply /note to a text, photo or voice message.";
const READ_USAGE: &str = "Usage: /read <id> (see /notes)";
const MEDIA_HINT: &str = "To keep this as a note, reply to it with /note.";

/// Reply text for a calculator request.
pub fn calc_reply(expression: &str) -> String {
    match calc::evaluate(expression) {
        Ok(value) => format!("= {value}"),
        Err(e) => format!("Error: {e}"),
    }
}

fn parse_note_id(arg: &str) -> Option<NoteId> {
    arg.trim()
        .trim_start_matches('#')
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(NoteId)
}

pub struct BotService {
    cfg: Arc<Config>,
    notes: Arc<NoteStore>,
    messenger: Arc<dyn MessagingPort>,
}

impl BotService {
    pub fn new(
        cfg: Arc<Config>,
        notes: Arc<NoteStore>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            cfg,
            notes,
            messenger,
        }
    }

    pub async fn handle(&self, msg: IncomingMessage) -> Result<()> {
        match &msg.content {
            MessageContent::Text(text) => match parse_command(text) {
                Some(cmd) => self.handle_command(&msg, cmd).await,
                None => self.reply(msg.chat_id, &calc_reply(text)).await,
            },
            MessageContent::Photo {
                file_id,
                caption: Some(caption),
            } => match parse_command(caption) {
                // Photo sent with a `/note ...` caption.
                Some(Command::Note(rest)) => {
                    let payload = NotePayload::Photo {
                        file_id: file_id.clone(),
                        caption: Some(rest).filter(|c| !c.is_empty()),
                    };
                    self.save_note(&msg, payload).await
                }
                _ => self.reply(msg.chat_id, MEDIA_HINT).await,
            },
            _ => self.reply(msg.chat_id, MEDIA_HINT).await,
        }
    }

    async fn handle_command(&self, msg: &IncomingMessage, cmd: Command) -> Result<()> {
        debug!(
            user_id = msg.user_id.0,
            username = msg.username.as_deref().unwrap_or("unknown"),
            command = cmd.name(),
            "command"
        );
        match cmd {
            Command::Start | Command::Help => self.reply(msg.chat_id, HELP_TEXT).await,
            Command::Calc(expr) if expr.is_empty() => self.reply(msg.chat_id, CALC_USAGE).await,
            Command::Calc(expr) => self.reply(msg.chat_id, &calc_reply(&expr)).await,
            Command::Note(rest) => {
                let payload = if rest.is_empty() {
                    msg.reply_to.as_ref().and_then(NotePayload::from_content)
                } else {
                    Some(NotePayload::Text { text: rest })
                };
                match payload {
                    Some(payload) => self.save_note(msg, payload).await,
                    None => self.reply(msg.chat_id, NOTE_USAGE).await,
                }
            }
            Command::Notes => self.list_notes(msg).await,
            Command::Read(arg) => match parse_note_id(&arg) {
                Some(id) => self.read_note(msg, id).await,
                None => self.reply(msg.chat_id, READ_USAGE).await,
            },
            Command::Unknown(name) => {
                let text = format!("Unknown command /{name}. See /help.");
                self.reply(msg.chat_id, &text).await
            }
        }
    }

    async fn save_note(&self, msg: &IncomingMessage, payload: NotePayload) -> Result<()> {
        match self.notes.save(msg.user_id, &payload).await {
            Ok(id) => {
                info!(user_id = msg.user_id.0, note_id = id.0, kind = payload.kind(), "note saved");
                let text = format!("✅ Saved as #{}. Use /notes to see your notes.", id.0);
                self.reply(msg.chat_id, &text).await
            }
            Err(e) => {
                warn!(user_id = msg.user_id.0, error = %e, "failed to save note");
                self.reply(msg.chat_id, &format!("Could not save: {e}")).await
            }
        }
    }

    async fn list_notes(&self, msg: &IncomingMessage) -> Result<()> {
        let rows = self
            .notes
            .list(msg.user_id, self.cfg.notes_list_limit)
            .await;
        if rows.is_empty() {
            return self
                .reply(msg.chat_id, "No notes yet. Save one with /note <text>.")
                .await;
        }
        self.reply(msg.chat_id, &format_note_list(&rows)).await
    }

    async fn read_note(&self, msg: &IncomingMessage, id: NoteId) -> Result<()> {
        let (payload, created_at) = match self.notes.load(msg.user_id, id).await {
            Ok(v) => v,
            Err(Error::NotFound(_)) => {
                return self
                    .reply(msg.chat_id, &format!("Note #{} not found.", id.0))
                    .await;
            }
            Err(e) => {
                warn!(user_id = msg.user_id.0, note_id = id.0, error = %e, "failed to open note");
                return self
                    .reply(msg.chat_id, &format!("Could not open: {e}"))
                    .await;
            }
        };

        let header = note_header(created_at);
        let media = self.messenger.capabilities().supports_media;
        match payload {
            NotePayload::Text { text } => {
                self.reply(msg.chat_id, &format!("{header}\n\n{text}")).await
            }
            NotePayload::Photo { file_id, caption } if media => {
                let caption = match caption {
                    Some(c) => format!("{header}\n{c}"),
                    None => header,
                };
                self.messenger
                    .send_photo(msg.chat_id, &file_id, &self.fit(&caption))
                    .await?;
                Ok(())
            }
            NotePayload::Voice { file_id } if media => {
                self.messenger
                    .send_voice(msg.chat_id, &file_id, &header)
                    .await?;
                Ok(())
            }
            other => {
                let text = format!("{header}\n\n({} note)", other.kind());
                self.reply(msg.chat_id, &text).await
            }
        }
    }

    fn fit(&self, text: &str) -> String {
        let limit = self
            .cfg
            .telegram_safe_limit
            .min(self.messenger.capabilities().max_message_len);
        truncate_text(text, limit)
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.messenger.send_text(chat_id, &self.fit(text)).await?;
        Ok(())
    }
}
