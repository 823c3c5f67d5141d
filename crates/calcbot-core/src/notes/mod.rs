//! Encrypted personal notes: AES-256-GCM sealed payloads in a JSON table.

pub mod crypto;
pub mod payload;
pub mod store;

pub use crypto::{decrypt, encrypt, NoteCipher, SecretKey};
pub use payload::NotePayload;
pub use store::{NoteRow, NoteStore};
