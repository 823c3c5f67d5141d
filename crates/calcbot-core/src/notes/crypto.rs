use std::fmt;

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{errors::Error, Result};

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;

/// AES-256 key. `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let raw = STANDARD.decode(encoded.trim()).map_err(|e| {
            Error::Config(format!("ENC_KEY_B64 is not valid base64: {e}"))
        })?;
        let bytes: [u8; KEY_LEN] = raw.as_slice().try_into().map_err(|_| {
            Error::Config(format!(
                "ENC_KEY_B64 must be base64 of {KEY_LEN} bytes (AES-256), got {}",
                raw.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// AES-256-GCM sealing for note payloads.
///
/// Layout: `nonce (12) || ciphertext || tag (16)`, fresh random nonce per call.
pub struct NoteCipher {
    aead: Aes256Gcm,
}

impl NoteCipher {
    pub fn new(key: &SecretKey) -> Self {
        Self {
            aead: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes())),
        }
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .aead
            .encrypt(&nonce, plaintext)
            .map_err(|_| Error::Crypto("encryption failed".to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(nonce.as_slice());
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() < NONCE_LEN {
            return Err(Error::Crypto("ciphertext too short".to_string()));
        }
        let (nonce, sealed) = data.split_at(NONCE_LEN);
        self.aead
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| Error::Crypto("decryption failed (wrong key or corrupted data)".to_string()))
    }
}

/// One-shot [`NoteCipher::encrypt`].
pub fn encrypt(key: &SecretKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    NoteCipher::new(key).encrypt(plaintext)
}

/// One-shot [`NoteCipher::decrypt`].
pub fn decrypt(key: &SecretKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    NoteCipher::new(key).decrypt(ciphertext)
}
