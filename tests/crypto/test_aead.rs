// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-128-CCM Envelope Tests
//!
//! Round trips, nonce freshness, tamper detection and size limits.

use iot_crypto::crypto::aead::{decrypt_with_key, encrypt_with_key, encrypt_with_rng};
use iot_crypto::crypto::constants::{MAX_PLAINTEXT_SIZE, MIN_ENVELOPE_SIZE, NONCE_SIZE};
use iot_crypto::crypto::{decrypt, encrypt, CryptoError, Envelope, SymmetricKey};
use rand::{rngs::OsRng, CryptoRng, RngCore};

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let mut plaintext = vec![0u8; 4096];
    OsRng.fill_bytes(&mut plaintext);

    for len in [0usize, 1, 15, 16, 17, 255, 4096] {
        let envelope = encrypt(b"device-key", &plaintext[..len]).unwrap();
        let decrypted = decrypt(b"device-key", &envelope).unwrap();
        assert_eq!(decrypted, &plaintext[..len]);
    }
}

#[test]
fn test_nonce_randomized_per_call() {
    let e1 = encrypt(b"k", b"same message").unwrap();
    let e2 = encrypt(b"k", b"same message").unwrap();

    assert_ne!(e1, e2);
    assert_ne!(e1[..NONCE_SIZE * 2], e2[..NONCE_SIZE * 2]);
    assert_eq!(decrypt(b"k", &e1).unwrap(), b"same message");
    assert_eq!(decrypt(b"k", &e2).unwrap(), b"same message");
}

#[test]
fn test_tampered_tag_fails() {
    let key = SymmetricKey::derive(b"k");
    let envelope = encrypt_with_key(&key, b"payload").unwrap();

    let mut bytes = envelope.as_bytes().to_vec();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    let tampered = Envelope::from_bytes(bytes).unwrap();

    assert_eq!(
        decrypt_with_key(&key, &tampered),
        Err(CryptoError::AuthenticationFailed)
    );
}

#[test]
fn test_any_flipped_byte_fails() {
    let key = SymmetricKey::derive(b"k");
    let envelope = encrypt_with_key(&key, b"open the door").unwrap();

    for i in 0..envelope.as_bytes().len() {
        let mut bytes = envelope.as_bytes().to_vec();
        bytes[i] ^= 0x01;
        let tampered = Envelope::from_bytes(bytes).unwrap();
        assert_eq!(
            decrypt_with_key(&key, &tampered),
            Err(CryptoError::AuthenticationFailed),
            "flipped byte {} went undetected",
            i
        );
    }
}

#[test]
fn test_wrong_key_fails() {
    let envelope = encrypt(b"right key", b"secret").unwrap();
    assert_eq!(
        decrypt(b"wrong key", &envelope),
        Err(CryptoError::AuthenticationFailed)
    );
}

#[test]
fn test_truncated_envelope() {
    let envelope = encrypt(b"k", b"").unwrap();
    let truncated = &envelope[..envelope.len() - 2];

    assert_eq!(
        decrypt(b"k", truncated),
        Err(CryptoError::EnvelopeTooShort {
            minimum: MIN_ENVELOPE_SIZE,
            actual: MIN_ENVELOPE_SIZE - 1,
        })
    );
}

#[test]
fn test_odd_length_envelope_is_encoding_error() {
    let envelope = encrypt(b"k", b"abc").unwrap();
    assert!(matches!(
        decrypt(b"k", &envelope[..envelope.len() - 1]),
        Err(CryptoError::InvalidEncoding { .. })
    ));
}

#[test]
fn test_key_material_any_length() {
    let long_material = vec![0x42u8; 10_000];
    let envelope = encrypt(&long_material, b"x").unwrap();
    assert_eq!(decrypt(&long_material, &envelope).unwrap(), b"x");

    let envelope = encrypt(b"", b"x").unwrap();
    assert_eq!(decrypt(b"", &envelope).unwrap(), b"x");
}

#[test]
fn test_payload_too_large() {
    let plaintext = vec![0u8; MAX_PLAINTEXT_SIZE + 1];
    let result = encrypt(b"k", &plaintext);
    assert!(matches!(result, Err(CryptoError::PayloadTooLarge { .. })));
}

/// Hands out `00 01 02 ..` so the nonce is known in advance
struct CountingRng(u8);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.0;
            self.0 = self.0.wrapping_add(1);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for CountingRng {}

#[test]
fn test_interop_with_openssl_ccm() {
    // OpenSSL EVP_aes_128_ccm, key = SHA-256("0123456789abcdef"), 12-byte nonce, 16-byte tag
    let expected = "000102030405060708090a0ba16cdca6bc1a378205b0a3bf7f725143bab9239990d833c534b03c58be6100244e71a540";

    let key = SymmetricKey::derive(b"0123456789abcdef");
    let envelope = encrypt_with_rng(&key, b"Hello, World!!!!!!!!", &mut CountingRng(0)).unwrap();
    assert_eq!(envelope.to_hex(), expected);

    assert_eq!(
        decrypt(b"0123456789abcdef", expected).unwrap(),
        b"Hello, World!!!!!!!!"
    );
}
