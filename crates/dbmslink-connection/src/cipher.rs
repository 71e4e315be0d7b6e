//! Password encryption for stored connection credentials
//!
//! Saved connections keep their password encrypted, keyed by the user the
//! password belongs to. The [`Decryptor`] and [`Encryptor`] traits are the seam
//! the resolver and snapshot writer depend on; [`PasswordCipher`] is the
//! default implementation built on `ring`:
//!
//! - key: SHA-256 of the context (the database user)
//! - cipher: AES-256-GCM with a random 96-bit nonce, the context as associated data
//! - wire form: standard base64 of `nonce || ciphertext || tag`

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use dbmslink_core::{DbmsLinkError, Result};
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::digest::{SHA256, digest};
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

/// Why a stored password could not be decrypted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptionError {
    #[error("Malformed ciphertext: {0}")]
    MalformedEncoding(String),

    #[error("Cipher operation failed")]
    Cipher,

    #[error("Decrypted password is not valid UTF-8")]
    InvalidUtf8,
}

/// Turns a stored, encrypted password back into plaintext.
///
/// Implementations must be reentrant; a single decryptor is shared by every
/// resolution.
pub trait Decryptor: Send + Sync {
    /// Decrypt `ciphertext` that was encrypted for `context`
    fn decrypt(&self, ciphertext: &str, context: &str) -> std::result::Result<String, DecryptionError>;
}

/// Encrypts a plaintext password for storage
pub trait Encryptor: Send + Sync {
    /// Encrypt `plaintext` bound to `context`
    fn encrypt(&self, plaintext: &str, context: &str) -> Result<String>;
}

/// AES-256-GCM password cipher keyed by the database user
#[derive(Debug, Clone)]
pub struct PasswordCipher {
    rng: SystemRandom,
}

impl PasswordCipher {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    fn key_for(context: &str) -> Option<LessSafeKey> {
        let hash = digest(&SHA256, context.as_bytes());
        UnboundKey::new(&AES_256_GCM, hash.as_ref())
            .ok()
            .map(LessSafeKey::new)
    }
}

impl Default for PasswordCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl Encryptor for PasswordCipher {
    fn encrypt(&self, plaintext: &str, context: &str) -> Result<String> {
        let key = Self::key_for(context)
            .ok_or_else(|| DbmsLinkError::Security("Failed to derive password key".to_string()))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| DbmsLinkError::Security("Failed to generate nonce".to_string()))?;

        let mut in_out = plaintext.as_bytes().to_vec();
        key.seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::from(context.as_bytes()),
            &mut in_out,
        )
        .map_err(|_| DbmsLinkError::Security("Failed to encrypt password".to_string()))?;

        let mut wire = Vec::with_capacity(NONCE_LEN + in_out.len());
        wire.extend_from_slice(&nonce_bytes);
        wire.extend_from_slice(&in_out);
        Ok(STANDARD.encode(wire))
    }
}

impl Decryptor for PasswordCipher {
    fn decrypt(&self, ciphertext: &str, context: &str) -> std::result::Result<String, DecryptionError> {
        let wire = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| DecryptionError::MalformedEncoding(e.to_string()))?;

        if wire.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(DecryptionError::MalformedEncoding(format!(
                "expected at least {} bytes, got {}",
                NONCE_LEN + AES_256_GCM.tag_len(),
                wire.len()
            )));
        }

        let (nonce_bytes, sealed) = wire.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| DecryptionError::MalformedEncoding("invalid nonce".to_string()))?;
        let key = Self::key_for(context).ok_or(DecryptionError::Cipher)?;

        let mut in_out = sealed.to_vec();
        let plaintext = key
            .open_in_place(nonce, Aad::from(context.as_bytes()), &mut in_out)
            .map_err(|_| DecryptionError::Cipher)?;

        String::from_utf8(plaintext.to_vec()).map_err(|_| DecryptionError::InvalidUtf8)
    }
}
