// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error Classification Tests
//!
//! Each failing operation surfaces the matching `CryptoError` variant and
//! every caller-side failure is distinguishable from an RNG outage.

use iot_crypto::crypto::{
    aead, decrypt, derive_shared_secret_from_bytes, hex_api, CryptoError, PrivateKey, PublicKey,
    Signature,
};

#[test]
fn test_private_key_failures() {
    let wrong_width = PrivateKey::from_bytes(&[1u8; 31]).unwrap_err();
    assert!(matches!(wrong_width, CryptoError::InvalidPrivateKey { .. }));

    let not_hex = PrivateKey::from_hex(&"zz".repeat(32)).unwrap_err();
    assert!(matches!(not_hex, CryptoError::InvalidEncoding { .. }));

    let zero = PrivateKey::from_bytes(&[0u8; 32]).unwrap_err();
    assert!(matches!(zero, CryptoError::InvalidPrivateKey { .. }));
}

#[test]
fn test_public_key_failures() {
    let wrong_prefix = format!("05{}", "11".repeat(64));
    assert!(matches!(
        PublicKey::from_hex(&wrong_prefix),
        Err(CryptoError::InvalidPublicKey { .. })
    ));

    assert!(matches!(
        PublicKey::from_sec1_bytes(&[0x04; 64]),
        Err(CryptoError::InvalidPublicKey { .. })
    ));
}

#[test]
fn test_signature_failures() {
    assert!(matches!(
        Signature::from_der(&[0x30, 0x02, 0x02, 0x00]),
        Err(CryptoError::MalformedSignature { .. })
    ));
    assert!(matches!(
        Signature::from_hex("30zz"),
        Err(CryptoError::MalformedSignature { .. })
    ));
}

#[test]
fn test_envelope_failures() {
    assert!(matches!(
        decrypt(b"k", "00"),
        Err(CryptoError::EnvelopeTooShort { actual: 1, .. })
    ));
    assert!(matches!(
        decrypt(b"k", "not an envelope"),
        Err(CryptoError::InvalidEncoding { .. })
    ));

    let envelope = aead::encrypt(b"k", b"body").unwrap();
    assert_eq!(
        decrypt(b"other", &envelope),
        Err(CryptoError::AuthenticationFailed)
    );
}

#[test]
fn test_non_utf8_payload() {
    let envelope = aead::encrypt(b"k", &[0xff, 0xfe, 0x00]).unwrap();
    let err = hex_api::decrypt("k", &envelope).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidUtf8(_)));

    // Raw API still returns the bytes
    assert_eq!(decrypt(b"k", &envelope).unwrap(), vec![0xff, 0xfe, 0x00]);
}

#[test]
fn test_ecdh_failures_reported_per_side() {
    let peer = PrivateKey::generate().unwrap().public_key().to_uncompressed();

    assert!(matches!(
        derive_shared_secret_from_bytes(&[0u8; 32], &peer),
        Err(CryptoError::InvalidPrivateKey { .. })
    ));
    assert!(matches!(
        derive_shared_secret_from_bytes(&[7u8; 32], &peer[..64]),
        Err(CryptoError::InvalidPublicKey { .. })
    ));
}

#[test]
fn test_all_input_failures_are_caller_errors() {
    let errors = vec![
        PrivateKey::from_bytes(&[0u8; 32]).unwrap_err(),
        PublicKey::from_hex("04").unwrap_err(),
        Signature::from_hex("").unwrap_err(),
        decrypt(b"k", "").unwrap_err(),
        decrypt(b"k", &aead::encrypt(b"a", b"b").unwrap()).unwrap_err(),
    ];

    for err in errors {
        assert!(err.is_caller_error(), "{:?} should be a caller error", err);
    }
}

#[test]
fn test_error_messages_do_not_leak_key_material() {
    let secret_hex = "deadbeef".repeat(8);
    let envelope = aead::encrypt(secret_hex.as_bytes(), b"body").unwrap();
    let err = decrypt(b"guess", &envelope).unwrap_err();

    assert!(!err.to_string().contains(&secret_hex));
    assert!(!format!("{:?}", err).contains(&secret_hex));
}
