// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! One error type for every primitive in this crate. Variants are split so
//! callers can tell caller mistakes (bad hex, bad key, short envelope) apart
//! from environment failures (entropy source unavailable).
//!
//! ## Error Variants
//!
//! - **RngFailure**: the secure random source could not produce bytes
//! - **InvalidEncoding**: malformed hex at the boundary
//! - **InvalidPrivateKey** / **InvalidPublicKey**: out-of-range scalar or off-curve point
//! - **MalformedSignature**: DER structure invalid or `r`/`s` out of range
//! - **EnvelopeTooShort**: ciphertext envelope below nonce + tag size
//! - **AuthenticationFailed**: CCM tag mismatch (wrong key or tampering)
//! - **PayloadTooLarge**: plaintext exceeds the CCM length field
//! - **InvalidUtf8**: authenticated plaintext is not a UTF-8 string
//!
//! `verify` never surfaces `MalformedSignature` or `InvalidPublicKey` to its
//! caller; both collapse into `false`.

use thiserror::Error;

/// Error type for all cryptographic operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The secure random source failed to produce bytes
    #[error("Secure random source unavailable during {operation}: {reason}")]
    RngFailure {
        /// Which operation needed randomness
        operation: &'static str,
        /// Underlying RNG error
        reason: String,
    },

    /// Hex input is malformed (odd length or non-hex characters)
    #[error("Invalid hex encoding for {field}: {reason}")]
    InvalidEncoding {
        /// Which input failed to decode
        field: &'static str,
        /// Specific failure reason
        reason: String,
    },

    /// Private scalar has the wrong width or lies outside `[1, n-1]`
    #[error("Invalid private key: {reason}")]
    InvalidPrivateKey {
        /// Specific failure reason
        reason: String,
    },

    /// Public key is not a valid, non-identity curve point
    #[error("Invalid public key: {reason}")]
    InvalidPublicKey {
        /// Specific failure reason
        reason: String,
    },

    /// DER signature could not be parsed or `r`/`s` are out of range
    #[error("Malformed signature: {reason}")]
    MalformedSignature {
        /// Specific failure reason
        reason: String,
    },

    /// Envelope is shorter than nonce + tag
    #[error("Envelope too short: expected at least {minimum} bytes, got {actual}")]
    EnvelopeTooShort {
        /// Minimum envelope size (nonce + tag)
        minimum: usize,
        /// Actual decoded size
        actual: usize,
    },

    /// Authentication tag verification failed
    ///
    /// Raised for a wrong key and for a tampered envelope alike.
    #[error("Authentication failed: envelope was tampered with or the key is wrong")]
    AuthenticationFailed,

    /// Plaintext is longer than the CCM length field can express
    #[error("Payload too large: maximum {max} bytes, got {actual}")]
    PayloadTooLarge {
        /// Largest plaintext accepted
        max: usize,
        /// Actual plaintext size
        actual: usize,
    },

    /// Decrypted payload is not valid UTF-8
    #[error("Decrypted payload is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

impl CryptoError {
    /// True when the caller supplied bad input, false for environment failures.
    ///
    /// `RngFailure` is the only environment failure; callers may retry it.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, CryptoError::RngFailure { .. })
    }

    pub(crate) fn rng(operation: &'static str, err: impl std::fmt::Display) -> Self {
        CryptoError::RngFailure {
            operation,
            reason: err.to_string(),
        }
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::InvalidEncoding {
            field: "hex_field",
            reason: err.to_string(),
        }
    }
}
