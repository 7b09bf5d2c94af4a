// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hex Codec
//!
//! Every value crosses the crate boundary as a lowercase hex string. These
//! helpers convert between those strings and the internal byte buffers and
//! map malformed input to `CryptoError::InvalidEncoding` before any
//! cryptographic work happens.

use super::error::CryptoError;

/// Encode bytes as lowercase hex (`2 * bytes.len()` characters)
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Decode an even-length hex string
///
/// `field` names the input in the error so callers can tell which argument
/// was malformed.
pub fn decode(field: &'static str, input: &str) -> Result<Vec<u8>, CryptoError> {
    hex::decode(input).map_err(|e| CryptoError::InvalidEncoding {
        field,
        reason: e.to_string(),
    })
}

/// Decode a hex string that must hold exactly `N` bytes
pub fn decode_array<const N: usize>(
    field: &'static str,
    input: &str,
) -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    hex::decode_to_slice(input, &mut out).map_err(|e| CryptoError::InvalidEncoding {
        field,
        reason: match e {
            hex::FromHexError::InvalidStringLength => format!(
                "expected {} hex characters, got {}",
                N * 2,
                input.len()
            ),
            other => other.to_string(),
        },
    })?;
    Ok(out)
}
