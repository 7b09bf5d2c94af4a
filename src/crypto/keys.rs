// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! P-256 Key Pairs
//!
//! Private keys are 32-byte big-endian scalars in `[1, n-1]`; public keys are
//! SEC1 points, always emitted uncompressed (`0x04 || X || Y`, 65 bytes).
//!
//! ## Security Considerations
//!
//! - Scalars are drawn by rejection sampling from the OS RNG, never reduced
//!   modulo the order
//! - Private scalars are zeroized on drop and redacted from `Debug`
//! - Out-of-range scalars and off-curve points are rejected on construction,
//!   so every `PrivateKey` / `PublicKey` value is valid by type

use std::fmt;

use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{FieldBytes, SecretKey};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use super::codec;
use super::constants::{COMPRESSED_PUBLIC_KEY_SIZE, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
use super::error::CryptoError;

/// A P-256 private scalar held by exactly one party
#[derive(Clone)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Generate a fresh private key from the OS random source
    ///
    /// # Errors
    ///
    /// `RngFailure` if the OS random source is unavailable
    pub fn generate() -> Result<Self, CryptoError> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate a private key from the given secure RNG
    ///
    /// Candidates equal to zero or `>= n` are discarded and redrawn so the
    /// result is uniform over `[1, n-1]`.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, CryptoError> {
        let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        loop {
            rng.try_fill_bytes(&mut candidate[..])
                .map_err(|e| CryptoError::rng("private key generation", e))?;

            if let Ok(secret) = SecretKey::from_bytes(FieldBytes::from_slice(&candidate[..])) {
                return Ok(PrivateKey(secret));
            }
            debug!("Scalar candidate outside [1, n-1], resampling");
        }
    }

    /// Parse a 32-byte big-endian scalar
    ///
    /// # Errors
    ///
    /// `InvalidPrivateKey` if the width is wrong or the scalar is 0 or `>= n`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(CryptoError::InvalidPrivateKey {
                reason: format!(
                    "expected {} bytes, got {}",
                    PRIVATE_KEY_SIZE,
                    bytes.len()
                ),
            });
        }

        SecretKey::from_bytes(FieldBytes::from_slice(bytes))
            .map(PrivateKey)
            .map_err(|_| CryptoError::InvalidPrivateKey {
                reason: "scalar must be in [1, n-1]".to_string(),
            })
    }

    /// Parse a 64-character hex scalar
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(codec::decode_array::<PRIVATE_KEY_SIZE>("private_key", hex)?);
        Self::from_bytes(&bytes[..])
    }

    /// Big-endian scalar bytes, zero-padded to 32 bytes
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        out.copy_from_slice(&self.0.to_bytes());
        out
    }

    /// Lowercase hex of the scalar (64 characters)
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(codec::encode(&self.to_bytes()[..]))
    }

    /// Derive the matching public key (`G * scalar`)
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// A P-256 public point, never the identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(p256::PublicKey);

impl PublicKey {
    /// Parse a SEC1 point (65-byte uncompressed or 33-byte compressed)
    ///
    /// # Errors
    ///
    /// `InvalidPublicKey` for any other width, an off-curve point, or the
    /// point at infinity
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PUBLIC_KEY_SIZE && bytes.len() != COMPRESSED_PUBLIC_KEY_SIZE {
            return Err(CryptoError::InvalidPublicKey {
                reason: format!(
                    "expected {} or {} bytes, got {}",
                    PUBLIC_KEY_SIZE,
                    COMPRESSED_PUBLIC_KEY_SIZE,
                    bytes.len()
                ),
            });
        }

        p256::PublicKey::from_sec1_bytes(bytes)
            .map(PublicKey)
            .map_err(|_| CryptoError::InvalidPublicKey {
                reason: "not a point on P-256".to_string(),
            })
    }

    /// Parse a hex SEC1 point
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = codec::decode("public_key", hex)?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Uncompressed SEC1 encoding: `0x04 || X(32) || Y(32)`
    pub fn to_uncompressed(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let point = self.0.to_encoded_point(false);
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Lowercase hex of the uncompressed point (130 characters)
    pub fn to_hex(&self) -> String {
        codec::encode(self.to_uncompressed())
    }

    pub(crate) fn inner(&self) -> &p256::PublicKey {
        &self.0
    }
}

/// Derive the public key for a private key
///
/// Deterministic: the same scalar always yields the same point.
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    private_key.public_key()
}

/// A private key together with its derived public key
#[derive(Clone, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair using the OS random number generator
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self::from_private_key(PrivateKey::generate()?))
    }

    /// Build a key pair around an existing private key
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        KeyPair {
            private_key,
            public_key,
        }
    }

    /// The private half
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// The public half
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}
