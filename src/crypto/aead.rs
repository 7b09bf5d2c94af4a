// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-128-CCM Envelopes
//!
//! Authenticated encryption of arbitrary payloads under a key derived from
//! caller-supplied key material.
//!
//! **Envelope Format**:
//! ```text
//! [nonce (12 bytes) | ciphertext (len = plaintext len) | tag (16 bytes)]
//! ```
//!
//! - Key: first 16 bytes of SHA-256(key_material)
//! - Nonce: 12 random bytes drawn on every encryption
//! - Tag: 16 bytes, verified before any plaintext is returned
//! - No Additional Authenticated Data
//!
//! Decrypting with the wrong key and decrypting a tampered envelope are
//! indistinguishable: both fail with `AuthenticationFailed`.

use std::fmt;

use aes::Aes128;
use ccm::aead::{generic_array::GenericArray, Aead, KeyInit};
use ccm::consts::{U12, U16};
use ccm::Ccm;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::codec;
use super::constants::{
    CIPHER_KEY_SIZE, DIGEST_SIZE, MAX_PLAINTEXT_SIZE, MIN_ENVELOPE_SIZE, NONCE_SIZE, TAG_SIZE,
};
use super::error::CryptoError;

/// AES-128 in CCM mode with a 16-byte tag and 12-byte nonce
type Aes128Ccm = Ccm<Aes128, U16, U12>;

/// 256-bit digest of arbitrary key material
///
/// The cipher consumes the leading 16 bytes.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; DIGEST_SIZE]);

impl SymmetricKey {
    /// Hash key material of any length into a fixed-width key
    pub fn derive(key_material: &[u8]) -> Self {
        SymmetricKey(Sha256::digest(key_material).into())
    }

    /// The full 32-byte digest
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    fn cipher(&self) -> Aes128Ccm {
        Aes128Ccm::new(GenericArray::from_slice(&self.0[..CIPHER_KEY_SIZE]))
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// A sealed `nonce || ciphertext || tag` envelope
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    bytes: Vec<u8>,
}

impl Envelope {
    /// Wrap raw envelope bytes
    ///
    /// # Errors
    ///
    /// `EnvelopeTooShort` if fewer than 28 bytes (nonce + tag) are given
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CryptoError> {
        if bytes.len() < MIN_ENVELOPE_SIZE {
            return Err(CryptoError::EnvelopeTooShort {
                minimum: MIN_ENVELOPE_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Envelope { bytes })
    }

    /// Decode a hex envelope
    ///
    /// # Errors
    ///
    /// - `InvalidEncoding` for malformed hex
    /// - `EnvelopeTooShort` for fewer than 28 decoded bytes
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(codec::decode("envelope", hex)?)
    }

    fn seal(nonce: &[u8; NONCE_SIZE], sealed: Vec<u8>) -> Self {
        let mut bytes = Vec::with_capacity(NONCE_SIZE + sealed.len());
        bytes.extend_from_slice(nonce);
        bytes.extend_from_slice(&sealed);
        Envelope { bytes }
    }

    /// The 12-byte nonce
    pub fn nonce(&self) -> &[u8] {
        &self.bytes[..NONCE_SIZE]
    }

    /// The ciphertext, same length as the plaintext
    pub fn ciphertext(&self) -> &[u8] {
        &self.bytes[NONCE_SIZE..self.bytes.len() - TAG_SIZE]
    }

    /// The 16-byte authentication tag
    pub fn tag(&self) -> &[u8] {
        &self.bytes[self.bytes.len() - TAG_SIZE..]
    }

    /// Ciphertext followed by tag, as the cipher consumes it
    fn sealed(&self) -> &[u8] {
        &self.bytes[NONCE_SIZE..]
    }

    /// Full envelope bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex of the envelope (`24 + 2 * len + 32` characters)
    pub fn to_hex(&self) -> String {
        codec::encode(&self.bytes)
    }
}

/// Encrypt a payload under a key derived from `key_material`
///
/// Returns the hex envelope. A fresh random nonce is drawn for every call.
///
/// # Errors
///
/// - `RngFailure` if no nonce can be drawn
/// - `PayloadTooLarge` if the plaintext exceeds the CCM length field
pub fn encrypt(key_material: &[u8], plaintext: &[u8]) -> Result<String, CryptoError> {
    let key = SymmetricKey::derive(key_material);
    Ok(encrypt_with_key(&key, plaintext)?.to_hex())
}

/// Decrypt a hex envelope under a key derived from `key_material`
///
/// # Errors
///
/// - `InvalidEncoding` if the envelope is not hex
/// - `EnvelopeTooShort` if it decodes to fewer than 28 bytes
/// - `AuthenticationFailed` on tag mismatch; no plaintext is released
pub fn decrypt(key_material: &[u8], hex_envelope: &str) -> Result<Vec<u8>, CryptoError> {
    let envelope = Envelope::from_hex(hex_envelope)?;
    let key = SymmetricKey::derive(key_material);
    decrypt_with_key(&key, &envelope)
}

/// Encrypt under an already derived key with the OS random source
pub fn encrypt_with_key(key: &SymmetricKey, plaintext: &[u8]) -> Result<Envelope, CryptoError> {
    encrypt_with_rng(key, plaintext, &mut OsRng)
}

/// Encrypt under an already derived key, drawing the nonce from `rng`
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    key: &SymmetricKey,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Envelope, CryptoError> {
    if plaintext.len() > MAX_PLAINTEXT_SIZE {
        return Err(CryptoError::PayloadTooLarge {
            max: MAX_PLAINTEXT_SIZE,
            actual: plaintext.len(),
        });
    }

    let mut nonce = [0u8; NONCE_SIZE];
    rng.try_fill_bytes(&mut nonce)
        .map_err(|e| CryptoError::rng("nonce generation", e))?;

    let sealed = key
        .cipher()
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::PayloadTooLarge {
            max: MAX_PLAINTEXT_SIZE,
            actual: plaintext.len(),
        })?;

    debug!("Sealed {} byte payload", plaintext.len());
    Ok(Envelope::seal(&nonce, sealed))
}

/// Decrypt an envelope under an already derived key
///
/// The tag is checked before any plaintext byte is returned.
pub fn decrypt_with_key(key: &SymmetricKey, envelope: &Envelope) -> Result<Vec<u8>, CryptoError> {
    let plaintext = key
        .cipher()
        .decrypt(GenericArray::from_slice(envelope.nonce()), envelope.sealed())
        .map_err(|_| {
            warn!("Envelope authentication failed");
            CryptoError::AuthenticationFailed
        })?;

    debug!("Opened {} byte payload", plaintext.len());
    Ok(plaintext)
}
