// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Agreement
//!
//! Implements Elliptic Curve Diffie-Hellman over P-256 between one party's
//! private scalar and the other party's public point. Both sides arrive at
//! the same 32-byte affine X coordinate.
//!
//! The raw X coordinate is not uniformly random. It is handed out as a
//! `SharedSecret`, and the only way to turn it into cipher key material is
//! through `SharedSecret::symmetric_key`, which hashes it.

use std::fmt;

use p256::ecdh::diffie_hellman;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::aead::SymmetricKey;
use super::codec;
use super::constants::SHARED_SECRET_SIZE;
use super::error::CryptoError;
use super::keys::{PrivateKey, PublicKey};

/// Affine X coordinate of `peer_point * own_scalar`
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SHARED_SECRET_SIZE]);

impl SharedSecret {
    /// Raw 32-byte big-endian X coordinate
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.0
    }

    /// Lowercase hex of the X coordinate (64 characters)
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(codec::encode(&self.0))
    }

    /// Hash the secret into a symmetric key
    ///
    /// The hex form is hashed, matching what a peer obtains by passing the
    /// hex shared key as `key_material` to `aead::encrypt`.
    pub fn symmetric_key(&self) -> SymmetricKey {
        SymmetricKey::derive(self.to_hex().as_bytes())
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

/// Derive the shared secret between our private key and a peer's public key
///
/// Symmetric: `derive_shared_secret(a.priv, b.pub) == derive_shared_secret(b.priv, a.pub)`.
/// The peer point is validated when the `PublicKey` is constructed.
pub fn derive_shared_secret(own_private_key: &PrivateKey, peer_public_key: &PublicKey) -> SharedSecret {
    let shared = diffie_hellman(
        own_private_key.secret().to_nonzero_scalar(),
        peer_public_key.inner().as_affine(),
    );

    let mut out = [0u8; SHARED_SECRET_SIZE];
    out.copy_from_slice(shared.raw_secret_bytes());
    SharedSecret(out)
}

/// Derive the shared secret from raw key bytes
///
/// # Arguments
///
/// * `own_private_key` - 32-byte big-endian scalar
/// * `peer_public_key` - SEC1 point (65 bytes uncompressed or 33 bytes compressed)
///
/// # Errors
///
/// - `InvalidPrivateKey` if the scalar is out of range
/// - `InvalidPublicKey` if the peer point is malformed, off-curve or the identity
pub fn derive_shared_secret_from_bytes(
    own_private_key: &[u8],
    peer_public_key: &[u8],
) -> Result<SharedSecret, CryptoError> {
    let private_key = PrivateKey::from_bytes(own_private_key)?;
    let public_key = PublicKey::from_sec1_bytes(peer_public_key)?;
    Ok(derive_shared_secret(&private_key, &public_key))
}
