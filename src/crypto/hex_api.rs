// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hex String Boundary
//!
//! String-in / string-out operations for collaborators that only handle hex
//! (device firmware bridges, the CLI). Widths:
//!
//! | Operation              | Input                              | Output                     |
//! |------------------------|------------------------------------|----------------------------|
//! | `generate_private_key` | -                                  | 64 chars                   |
//! | `derive_public_key`    | 64-char private key                | 130 chars, leading `04`    |
//! | `sign`                 | message + 64-char private key      | DER hex, variable length   |
//! | `verify`               | signature + message + public key   | `bool`                     |
//! | `get_shared_key`       | 64-char private + public key       | 64 chars                   |
//! | `encrypt`              | key string + message               | `24 + 2 * len + 32` chars  |
//! | `decrypt`              | key string + envelope hex          | message                    |

use tracing::debug;
use zeroize::Zeroizing;

use super::aead;
use super::ecdh;
use super::error::CryptoError;
use super::keys::{PrivateKey, PublicKey};
use super::signature::{self, Signature};

/// Generate a private key as 64 lowercase hex characters
pub fn generate_private_key() -> Result<Zeroizing<String>, CryptoError> {
    Ok(PrivateKey::generate()?.to_hex())
}

/// Derive the uncompressed public key (130 hex characters)
pub fn derive_public_key(private_key_hex: &str) -> Result<String, CryptoError> {
    let private_key = PrivateKey::from_hex(private_key_hex)?;
    Ok(private_key.public_key().to_hex())
}

/// Sign a message, returning the DER signature as hex
pub fn sign(message: &str, private_key_hex: &str) -> Result<String, CryptoError> {
    let private_key = PrivateKey::from_hex(private_key_hex)?;
    Ok(signature::sign(message.as_bytes(), &private_key)?.to_hex())
}

/// Verify a hex DER signature over a message
///
/// Malformed hex, malformed DER and invalid public keys all yield `false`.
pub fn verify(signature_hex: &str, message: &str, public_key_hex: &str) -> bool {
    let signature = match Signature::from_hex(signature_hex) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Signature rejected before verification: {}", e);
            return false;
        }
    };

    let public_key = match PublicKey::from_hex(public_key_hex) {
        Ok(key) => key,
        Err(e) => {
            debug!("Public key rejected before verification: {}", e);
            return false;
        }
    };

    signature::verify(&signature, message.as_bytes(), &public_key)
}

/// Compute the ECDH shared secret (raw X coordinate, 64 hex characters)
///
/// Pass the result to `encrypt`/`decrypt` as the key string; it is hashed
/// there before use.
pub fn get_shared_key(
    private_key_hex: &str,
    public_key_hex: &str,
) -> Result<Zeroizing<String>, CryptoError> {
    let private_key = PrivateKey::from_hex(private_key_hex)?;
    let public_key = PublicKey::from_hex(public_key_hex)?;
    Ok(ecdh::derive_shared_secret(&private_key, &public_key).to_hex())
}

/// Encrypt a message under a key string, returning the hex envelope
pub fn encrypt(key: &str, message: &str) -> Result<String, CryptoError> {
    aead::encrypt(key.as_bytes(), message.as_bytes())
}

/// Decrypt a hex envelope under a key string
///
/// # Errors
///
/// Everything `aead::decrypt` reports, plus `InvalidUtf8` when the
/// authenticated payload is not a string.
pub fn decrypt(key: &str, envelope_hex: &str) -> Result<Zeroizing<String>, CryptoError> {
    let plaintext = aead::decrypt(key.as_bytes(), envelope_hex)?;
    String::from_utf8(plaintext)
        .map(Zeroizing::new)
        .map_err(|e| {
            let reason = e.utf8_error().to_string();
            let _wiped = Zeroizing::new(e.into_bytes());
            CryptoError::InvalidUtf8(reason)
        })
}
