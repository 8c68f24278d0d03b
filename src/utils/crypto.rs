//! # Symmetric Cipher
//!
//! AES-256-GCM encryption of preset payloads with a key derived by hashing a
//! shared passphrase.
//!
//! The format fixes the nonce to 12 zero bytes and the passphrase to a static
//! application-embedded constant. Nonce reuse under a static key is a known
//! weakness of this format; it is kept bit-for-bit for backward file
//! compatibility and must not be changed without a new envelope version.
//!
//! Decryption is authenticated: any tampering with ciphertext or tag fails
//! with [`CodecError::DecryptionFailed`] and never yields partial plaintext.

use crate::error::{CodecError, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use sha2::{Digest, Sha256};

/// Nonce fixed by the container format.
const ZERO_NONCE: [u8; 12] = [0u8; 12];

/// Derive a fixed-length cipher key from a passphrase.
///
/// Deterministic SHA-256 of the UTF-8 passphrase bytes.
pub fn derive_key(passphrase: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(passphrase.as_bytes());
    hasher.finalize().into()
}

/// Encrypt `plaintext` under the passphrase-derived key and the fixed nonce.
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let key = derive_key(passphrase);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    cipher
        .encrypt(Nonce::from_slice(&ZERO_NONCE), plaintext)
        .map_err(|_| CodecError::EncryptionFailed)
}

/// Decrypt and authenticate `ciphertext`.
pub fn decrypt(ciphertext: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    let key = derive_key(passphrase);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    cipher
        .decrypt(Nonce::from_slice(&ZERO_NONCE), ciphertext)
        .map_err(|_| CodecError::DecryptionFailed)
}
