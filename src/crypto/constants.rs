// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed protocol parameters.
//!
//! Curve, hash and cipher are constants of the protocol, not negotiable.

/// Curve name (NIST P-256 / secp256r1 / prime256v1)
pub const CURVE: &str = "P-256";

/// Message and key-material digest
pub const HASH: &str = "SHA-256";

/// Authenticated cipher
pub const CIPHER: &str = "AES-128-CCM";

/// Private scalar width in bytes (big-endian, zero-padded)
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Uncompressed SEC1 point width: `0x04 || X || Y`
pub const PUBLIC_KEY_SIZE: usize = 65;

/// Compressed SEC1 point width: `0x02/0x03 || X`
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// ECDH shared secret width (affine X coordinate)
pub const SHARED_SECRET_SIZE: usize = 32;

/// SHA-256 digest width
pub const DIGEST_SIZE: usize = 32;

/// AES-128 key width; the leading bytes of the key-material digest
pub const CIPHER_KEY_SIZE: usize = 16;

/// CCM nonce width
pub const NONCE_SIZE: usize = 12;

/// CCM authentication tag width
pub const TAG_SIZE: usize = 16;

/// Smallest well-formed envelope (empty plaintext)
pub const MIN_ENVELOPE_SIZE: usize = NONCE_SIZE + TAG_SIZE;

/// Largest plaintext CCM accepts with a 12-byte nonce (3-byte length field)
pub const MAX_PLAINTEXT_SIZE: usize = (1 << (8 * (15 - NONCE_SIZE))) - 1;
