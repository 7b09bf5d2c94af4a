// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Device Private Key Loading
//!
//! Reads a device's long-term private key from an environment variable so it
//! never has to appear on a command line.
//!
//! ## Security Considerations
//!
//! - Key is read from a named environment variable (`IOT_PRIVATE_KEY` by default)
//! - Must be 64 hex characters, optionally prefixed with `0x`
//! - Key is NEVER logged
//! - Scalar range is validated before the key is handed out
//!
//! ## Usage
//!
//! ```no_run
//! use iot_crypto::crypto::load_private_key_from_env;
//!
//! let key = load_private_key_from_env("IOT_PRIVATE_KEY")?;
//! println!("Public key: {}", key.public_key().to_hex());
//! # Ok::<(), iot_crypto::crypto::CryptoError>(())
//! ```

use std::env;
use tracing::info;
use zeroize::Zeroizing;

use super::error::CryptoError;
use super::keys::PrivateKey;

/// Default variable holding the device private key
pub const PRIVATE_KEY_ENV: &str = "IOT_PRIVATE_KEY";

/// Load a private key from the environment variable `var`
///
/// # Errors
///
/// - `InvalidPrivateKey` if the variable is unset or empty
/// - `InvalidEncoding` if the value is not 64 hex characters
/// - `InvalidPrivateKey` if the scalar is 0 or not below the group order
pub fn load_private_key_from_env(var: &str) -> Result<PrivateKey, CryptoError> {
    let raw = Zeroizing::new(env::var(var).map_err(|_| CryptoError::InvalidPrivateKey {
        reason: format!("{} environment variable not set", var),
    })?);

    let key = parse_private_key(&raw).map_err(|e| match e {
        CryptoError::InvalidPrivateKey { reason } => CryptoError::InvalidPrivateKey {
            reason: format!("{}: {}", var, reason),
        },
        other => other,
    })?;

    // Log success WITHOUT logging the actual key
    info!("Device private key loaded from {}", var);
    Ok(key)
}

/// Parse a hex private key, tolerating surrounding whitespace and a `0x` prefix
pub fn parse_private_key(input: &str) -> Result<PrivateKey, CryptoError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CryptoError::InvalidPrivateKey {
            reason: "key is empty".to_string(),
        });
    }

    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    PrivateKey::from_hex(hex_str)
}
