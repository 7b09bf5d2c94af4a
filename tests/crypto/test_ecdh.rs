// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Agreement Tests
//!
//! Symmetry, agreement with the p256 reference implementation and peer
//! point validation.

use iot_crypto::crypto::{
    derive_shared_secret, derive_shared_secret_from_bytes, CryptoError, KeyPair,
};
use p256::{ecdh::EphemeralSecret, elliptic_curve::sec1::ToEncodedPoint, PublicKey, SecretKey};
use rand::rngs::OsRng;

#[test]
fn test_shared_secret_symmetric_for_many_pairs() {
    for _ in 0..16 {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();
        assert_eq!(
            derive_shared_secret(a.private_key(), b.public_key()),
            derive_shared_secret(b.private_key(), a.public_key()),
        );
    }
}

#[test]
fn test_matches_reference_ephemeral_exchange() {
    let node_secret = SecretKey::random(&mut OsRng);
    let node_priv_bytes = node_secret.to_bytes();

    let client_ephemeral = EphemeralSecret::random(&mut OsRng);
    let client_eph_pub = PublicKey::from(&client_ephemeral);
    let client_eph_pub_bytes = client_eph_pub.to_encoded_point(false);

    let ours =
        derive_shared_secret_from_bytes(&node_priv_bytes, client_eph_pub_bytes.as_bytes()).unwrap();
    let reference = client_ephemeral.diffie_hellman(&node_secret.public_key());

    assert_eq!(&ours.as_bytes()[..], &reference.raw_secret_bytes()[..]);
}

#[test]
fn test_compressed_peer_key_agrees_with_uncompressed() {
    let node_priv_bytes = SecretKey::random(&mut OsRng).to_bytes();
    let peer = SecretKey::random(&mut OsRng).public_key();

    let compressed = peer.to_encoded_point(true);
    let uncompressed = peer.to_encoded_point(false);

    let a = derive_shared_secret_from_bytes(&node_priv_bytes, compressed.as_bytes()).unwrap();
    let b = derive_shared_secret_from_bytes(&node_priv_bytes, uncompressed.as_bytes()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invalid_public_key_malformed() {
    let node_priv_bytes = SecretKey::random(&mut OsRng).to_bytes();

    // Correct size, not a point
    let invalid_pub = vec![0xFF; 33];
    assert!(matches!(
        derive_shared_secret_from_bytes(&node_priv_bytes, &invalid_pub),
        Err(CryptoError::InvalidPublicKey { .. })
    ));

    // Point at infinity
    assert!(matches!(
        derive_shared_secret_from_bytes(&node_priv_bytes, &[0x00]),
        Err(CryptoError::InvalidPublicKey { .. })
    ));
}

#[test]
fn test_off_curve_uncompressed_point_rejected() {
    let node_priv_bytes = SecretKey::random(&mut OsRng).to_bytes();
    let mut point = SecretKey::random(&mut OsRng)
        .public_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();
    point[64] ^= 0x01;

    assert!(matches!(
        derive_shared_secret_from_bytes(&node_priv_bytes, &point),
        Err(CryptoError::InvalidPublicKey { .. })
    ));
}

#[test]
fn test_invalid_private_key() {
    let client_eph_pub = PublicKey::from(&EphemeralSecret::random(&mut OsRng));
    let client_eph_pub_bytes = client_eph_pub.to_encoded_point(false);

    assert!(matches!(
        derive_shared_secret_from_bytes(&[0u8; 32], client_eph_pub_bytes.as_bytes()),
        Err(CryptoError::InvalidPrivateKey { .. })
    ));
}
