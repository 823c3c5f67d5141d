use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    domain::{NoteId, UserId},
    errors::Error,
    notes::{
        crypto::{NoteCipher, SecretKey},
        payload::NotePayload,
    },
    Result,
};

/// Listing entry; the payload stays sealed until [`NoteStore::load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct NoteTable {
    next_id: i64,
    notes: Vec<NoteRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct NoteRecord {
    id: i64,
    user_id: i64,
    created_at: String,
    /// base64(nonce || ciphertext || tag)
    payload_enc: String,
}

impl NoteRecord {
    fn created_at(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default()
    }
}

/// Encrypted per-user notes persisted as a JSON table.
///
/// Only the payload is encrypted; ids, owners and timestamps are stored in the
/// clear so listing does not need the key.
pub struct NoteStore {
    path: PathBuf,
    cipher: NoteCipher,
    table: Mutex<NoteTable>,
}

impl NoteStore {
    /// Open the table at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>, key: &SecretKey) -> Result<Self> {
        let path = path.into();
        let table = load_table(&path)?;
        Ok(Self {
            path,
            cipher: NoteCipher::new(key),
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save(&self, user_id: UserId, payload: &NotePayload) -> Result<NoteId> {
        let raw = serde_json::to_vec(payload)?;
        let sealed = self.cipher.encrypt(&raw)?;

        let mut table = self.table.lock().await;
        let id = table.next_id.max(1);
        table.notes.push(NoteRecord {
            id,
            user_id: user_id.0,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
            payload_enc: STANDARD.encode(sealed),
        });
        table.next_id = id + 1;

        if let Err(e) = save_table(&self.path, &table) {
            table.notes.pop();
            table.next_id = id;
            return Err(e);
        }
        Ok(NoteId(id))
    }

    /// Newest first, at most `limit` rows.
    pub async fn list(&self, user_id: UserId, limit: usize) -> Vec<NoteRow> {
        let table = self.table.lock().await;
        let mut rows: Vec<NoteRow> = table
            .notes
            .iter()
            .filter(|n| n.user_id == user_id.0)
            .map(|n| NoteRow {
                id: NoteId(n.id),
                created_at: n.created_at(),
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(limit);
        rows
    }

    /// Decrypt one note. Notes of other users are reported as missing.
    pub async fn load(
        &self,
        user_id: UserId,
        note_id: NoteId,
    ) -> Result<(NotePayload, DateTime<Utc>)> {
        let record = {
            let table = self.table.lock().await;
            table
                .notes
                .iter()
                .find(|n| n.id == note_id.0 && n.user_id == user_id.0)
                .cloned()
        };
        let Some(record) = record else {
            return Err(Error::NotFound(format!("note {}", note_id.0)));
        };

        let sealed = STANDARD
            .decode(&record.payload_enc)
            .map_err(|e| Error::Crypto(format!("note {} is not valid base64: {e}", record.id)))?;
        let raw = self.cipher.decrypt(&sealed)?;
        let payload: NotePayload = serde_json::from_slice(&raw)?;
        Ok((payload, record.created_at()))
    }
}

fn load_table(path: &Path) -> Result<NoteTable> {
    if !path.exists() {
        return Ok(NoteTable::default());
    }
    let txt = fs::read_to_string(path)?;
    if txt.trim().is_empty() {
        return Ok(NoteTable::default());
    }
    Ok(serde_json::from_str(&txt)?)
}

fn save_table(path: &Path, table: &NoteTable) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let txt = serde_json::to_string_pretty(table)?;
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    fs::write(&tmp, txt)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_file(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    fn key(b: u8) -> SecretKey {
        SecretKey::new([b; 32])
    }

    fn text(s: &str) -> NotePayload {
        NotePayload::Text {
            text: s.to_string(),
        }
    }

    #[tokio::test]
    async fn saves_lists_and_loads() {
        let path = tmp_file("calcbot-notes-basic");
        let store = NoteStore::open(&path, &key(1)).unwrap();

        let a = store.save(UserId(10), &text("first")).await.unwrap();
        let b = store
            .save(
                UserId(10),
                &NotePayload::Voice {
                    file_id: "v".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(a, NoteId(1));
        assert_eq!(b, NoteId(2));

        let rows = store.list(UserId(10), 20).await;
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![b, a]);

        let (payload, _) = store.load(UserId(10), a).await.unwrap();
        assert_eq!(payload, text("first"));

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn notes_are_private_to_their_owner() {
        let path = tmp_file("calcbot-notes-owner");
        let store = NoteStore::open(&path, &key(1)).unwrap();
        let id = store.save(UserId(1), &text("mine")).await.unwrap();

        assert!(store.list(UserId(2), 20).await.is_empty());
        assert!(matches!(
            store.load(UserId(2), id).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.load(UserId(1), NoteId(99)).await,
            Err(Error::NotFound(_))
        ));

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let path = tmp_file("calcbot-notes-limit");
        let store = NoteStore::open(&path, &key(1)).unwrap();
        for i in 0..5 {
            store.save(UserId(1), &text(&i.to_string())).await.unwrap();
        }
        let rows = store.list(UserId(1), 3).await;
        assert_eq!(
            rows.iter().map(|r| r.id.0).collect::<Vec<_>>(),
            vec![5, 4, 3]
        );

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn file_survives_reopen_and_never_holds_plaintext() {
        let path = tmp_file("calcbot-notes-reopen");
        {
            let store = NoteStore::open(&path, &key(3)).unwrap();
            store
                .save(UserId(1), &text("super secret shopping list"))
                .await
                .unwrap();
        }

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("super secret"));

        let store = NoteStore::open(&path, &key(3)).unwrap();
        let (payload, _) = store.load(UserId(1), NoteId(1)).await.unwrap();
        assert_eq!(payload, text("super secret shopping list"));
        let next = store.save(UserId(1), &text("again")).await.unwrap();
        assert_eq!(next, NoteId(2));

        let other_key = NoteStore::open(&path, &key(4)).unwrap();
        assert!(matches!(
            other_key.load(UserId(1), NoteId(1)).await,
            Err(Error::Crypto(_))
        ));

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let path = tmp_file("calcbot-notes-missing");
        let store = NoteStore::open(&path, &key(1)).unwrap();
        assert!(store.list(UserId(1), 20).await.is_empty());
        assert!(!path.exists());
    }
}
