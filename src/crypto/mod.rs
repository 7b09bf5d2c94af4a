// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Device Pairing Cryptography
//!
//! This module implements the primitives two IoT devices need to establish
//! trust and exchange confidential data over an untrusted channel:
//!
//! - **Keys**: P-256 private scalar generation and public point derivation
//! - **Signature**: SHA-256 + ECDSA with DER-encoded signatures
//! - **ECDH**: shared-secret agreement between one private key and a peer point
//! - **AEAD**: AES-128-CCM envelopes keyed by a SHA-256 digest of key material
//! - **Codec**: lowercase hex at every external boundary
//!
//! ## Security Considerations
//!
//! - Every encryption draws a fresh random nonce
//! - Tags are verified before any plaintext is released
//! - Signature verification reports only valid / not valid
//! - Private scalars, shared secrets and symmetric keys are zeroized on drop
//!
//! ## Protocol Flow
//!
//! 1. Each device generates a key pair and publishes its public key
//! 2. Devices sign messages with their own private key; peers verify with the public key
//! 3. Each device combines its private key with the peer's public key (ECDH)
//! 4. The hex shared secret is used as key material for `aead::encrypt`/`decrypt`,
//!    which hashes it into the cipher key

pub mod aead;
pub mod codec;
pub mod constants;
pub mod ecdh;
pub mod error;
pub mod hex_api;
pub mod keys;
pub mod private_key;
pub mod signature;

pub use aead::{decrypt, encrypt, Envelope, SymmetricKey};
pub use ecdh::{derive_shared_secret, derive_shared_secret_from_bytes, SharedSecret};
pub use error::CryptoError;
pub use keys::{derive_public_key, KeyPair, PrivateKey, PublicKey};
pub use private_key::{load_private_key_from_env, parse_private_key, PRIVATE_KEY_ENV};
pub use signature::{sign, verify, verify_der, Signature};
