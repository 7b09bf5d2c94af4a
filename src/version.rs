// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the IoT crypto toolkit

use crate::crypto::constants::{CIPHER, CURVE, HASH};

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-p256-ccm-2025-10-16";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-16";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "p256-keypairs",
    "ecdsa-sha256-der",
    "ecdh-shared-secret",
    "aes-128-ccm-envelopes",
    "hex-boundary",
];

/// Protocol algorithm identifiers (curve, hash, cipher)
pub const PROTOCOL: [&str; 3] = [CURVE, HASH, CIPHER];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!(
        "iot-crypto {} ({}) [{}]",
        VERSION_NUMBER,
        BUILD_DATE,
        PROTOCOL.join(" / ")
    )
}

/// Get full version info for machine-readable output
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
        "curve": CURVE,
        "hash": HASH,
        "cipher": CIPHER,
    })
}
