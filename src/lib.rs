// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod crypto;
pub mod version;

// Re-export main types
pub use crypto::{
    CryptoError, Envelope, KeyPair, PrivateKey, PublicKey, SharedSecret, Signature, SymmetricKey,
};
