// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Concurrent Use Tests
//!
//! Operations share no mutable state, so many devices can run them at once.

use iot_crypto::crypto::{decrypt, derive_shared_secret, encrypt, sign, verify, KeyPair};
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_key_generation_unique() {
    let mut handles = Vec::new();
    for _ in 0..32 {
        handles.push(tokio::task::spawn_blocking(|| {
            KeyPair::generate().unwrap().public_key().to_hex()
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        assert!(seen.insert(handle.await.unwrap()));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_key_across_tasks() {
    let signer = Arc::new(KeyPair::generate().unwrap());
    let mut handles = Vec::new();

    for i in 0..16 {
        let signer = Arc::clone(&signer);
        handles.push(tokio::task::spawn_blocking(move || {
            let message = format!("reading {}", i);
            let signature = sign(message.as_bytes(), signer.private_key()).unwrap();
            verify(&signature, message.as_bytes(), signer.public_key())
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_pairings() {
    let mut handles = Vec::new();

    for i in 0..16 {
        handles.push(tokio::task::spawn_blocking(move || {
            let alice = KeyPair::generate().unwrap();
            let bob = KeyPair::generate().unwrap();

            let alice_shared = derive_shared_secret(alice.private_key(), bob.public_key());
            let bob_shared = derive_shared_secret(bob.private_key(), alice.public_key());

            let payload = format!("payload {}", i);
            let envelope = encrypt(alice_shared.to_hex().as_bytes(), payload.as_bytes()).unwrap();
            let decrypted = decrypt(bob_shared.to_hex().as_bytes(), &envelope).unwrap();
            decrypted == payload.as_bytes()
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}
