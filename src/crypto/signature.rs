// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDSA Signatures over P-256
//!
//! Messages are hashed with SHA-256 and signed with a randomized nonce, so
//! signing the same message twice yields two different (both valid)
//! signatures. Signatures travel as DER `SEQUENCE { r INTEGER, s INTEGER }`,
//! which is variable length (typically 70-72 bytes).
//!
//! `verify` answers only "valid" or "not valid": malformed DER, a wrong
//! signature and an unusable public key all come back as `false`.

use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::codec;
use super::constants::DIGEST_SIZE;
use super::error::CryptoError;
use super::keys::{PrivateKey, PublicKey};

/// A DER-encoded ECDSA signature with `r`, `s` in `[1, n-1]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: EcdsaSignature,
    der: Vec<u8>,
}

impl Signature {
    /// Parse a DER signature
    ///
    /// # Errors
    ///
    /// `MalformedSignature` if the DER structure is invalid or either
    /// scalar is zero or not below the group order
    pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
        let inner =
            EcdsaSignature::from_der(der).map_err(|e| CryptoError::MalformedSignature {
                reason: e.to_string(),
            })?;
        Ok(Signature {
            inner,
            der: der.to_vec(),
        })
    }

    /// Parse a hex DER signature
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let der = codec::decode("signature", hex).map_err(|e| CryptoError::MalformedSignature {
            reason: e.to_string(),
        })?;
        Self::from_der(&der)
    }

    fn from_ecdsa(inner: EcdsaSignature) -> Self {
        let der = inner.to_der().as_bytes().to_vec();
        Signature { inner, der }
    }

    /// DER bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Lowercase hex of the DER bytes
    pub fn to_hex(&self) -> String {
        codec::encode(&self.der)
    }
}

/// SHA-256 digest of a message
pub fn message_digest(message: &[u8]) -> [u8; DIGEST_SIZE] {
    Sha256::digest(message).into()
}

/// Sign a message with the OS random source
///
/// # Errors
///
/// `RngFailure` if the per-signature randomness cannot be drawn
pub fn sign(message: &[u8], private_key: &PrivateKey) -> Result<Signature, CryptoError> {
    sign_with_rng(message, private_key, &mut OsRng)
}

/// Sign a message, drawing per-signature randomness from `rng`
pub fn sign_with_rng<R: RngCore + CryptoRng>(
    message: &[u8],
    private_key: &PrivateKey,
    rng: &mut R,
) -> Result<Signature, CryptoError> {
    let digest = message_digest(message);
    let signing_key = SigningKey::from(private_key.secret());

    let mut checked = CheckedRng::new(rng);
    let signature: EcdsaSignature = signing_key
        .sign_prehash_with_rng(&mut checked, &digest)
        .map_err(|e| CryptoError::InvalidPrivateKey {
            reason: format!("signing failed: {}", e),
        })?;

    if let Some(err) = checked.failure {
        return Err(CryptoError::rng("signing", err));
    }

    debug!("Signed {} byte message", message.len());
    Ok(Signature::from_ecdsa(signature))
}

/// Verify a signature over a message
///
/// Returns `true` only for a signature made by the private key behind
/// `public_key` over exactly `message`.
pub fn verify(signature: &Signature, message: &[u8], public_key: &PublicKey) -> bool {
    let digest = message_digest(message);
    let verifying_key = VerifyingKey::from(public_key.inner());

    verifying_key
        .verify_prehash(&digest, &signature.inner)
        .is_ok()
}

/// Verify a DER signature against raw SEC1 public key bytes
///
/// Parsing failures of either the signature or the key yield `false`, the
/// same as a cryptographically wrong signature.
pub fn verify_der(signature_der: &[u8], message: &[u8], public_key_sec1: &[u8]) -> bool {
    let signature = match Signature::from_der(signature_der) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Signature rejected before verification: {}", e);
            return false;
        }
    };

    let public_key = match PublicKey::from_sec1_bytes(public_key_sec1) {
        Ok(key) => key,
        Err(e) => {
            debug!("Public key rejected before verification: {}", e);
            return false;
        }
    };

    verify(&signature, message, &public_key)
}

/// Forwards to a secure RNG and records a failure instead of panicking.
///
/// The ECDSA signer draws its added entropy through the infallible
/// `fill_bytes`; the recorded error is checked once signing returns.
struct CheckedRng<'a, R> {
    inner: &'a mut R,
    failure: Option<rand::Error>,
}

impl<'a, R: RngCore> CheckedRng<'a, R> {
    fn new(inner: &'a mut R) -> Self {
        CheckedRng {
            inner,
            failure: None,
        }
    }
}

impl<R: RngCore> RngCore for CheckedRng<'_, R> {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.inner.try_fill_bytes(dest) {
            self.failure.get_or_insert(e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl<R: RngCore + CryptoRng> CryptoRng for CheckedRng<'_, R> {}
