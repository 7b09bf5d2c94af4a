// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pairing Walkthrough
//!
//! Runs the full two-device flow end to end and reports each check:
//!
//! 1. Generate a key pair, sign a message, verify it
//! 2. Alice and Bob agree on a shared key from each other's public keys
//! 3. Alice encrypts under her shared key, Bob decrypts under his
//! 4. A signature made by some other key must not verify under a fresh key

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::Outcome;
use crate::crypto::hex_api;
use crate::version;

/// A DER signature over [`FOREIGN_MESSAGE`] made by a key this run never sees
pub const FOREIGN_SIGNATURE: &str = "304402206caa7f734d7ed1abdf6295922daf47e32efa849fbf8fd8128291f59135ad176302200a529b628f534083c400c80822c64a68f08a188e7375c9b129a7a8a7d37d4542";

/// Message covered by [`FOREIGN_SIGNATURE`]
pub const FOREIGN_MESSAGE: &str = "Hello, World!";

/// Arguments for demo command
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Message signed and encrypted during the walkthrough
    #[arg(long, default_value = "Hello, World!!!!!!!!")]
    pub message: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of every walkthrough check
///
/// Contains only public values; private keys and shared keys stay out.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub public_key: String,
    pub signature: String,
    pub signature_valid: bool,
    pub shared_key_match: bool,
    pub envelope: String,
    pub round_trip: bool,
    pub foreign_signature_rejected: bool,
}

impl DemoReport {
    /// True when every check came out as expected
    pub fn passed(&self) -> bool {
        self.signature_valid
            && self.shared_key_match
            && self.round_trip
            && self.foreign_signature_rejected
    }
}

/// Run the walkthrough for `message`
pub fn run_demo(message: &str) -> Result<DemoReport> {
    // Sign and verify
    let private_key = hex_api::generate_private_key()?;
    let public_key = hex_api::derive_public_key(&private_key)?;
    let signature = hex_api::sign(message, &private_key)?;
    let signature_valid = hex_api::verify(&signature, message, &public_key);

    // Key agreement
    let alice_private = hex_api::generate_private_key()?;
    let alice_public = hex_api::derive_public_key(&alice_private)?;
    let bob_private = hex_api::generate_private_key()?;
    let bob_public = hex_api::derive_public_key(&bob_private)?;

    let shared_alice = hex_api::get_shared_key(&alice_private, &bob_public)?;
    let shared_bob = hex_api::get_shared_key(&bob_private, &alice_public)?;
    let shared_key_match = shared_alice == shared_bob;

    // Encrypt on Alice's side, decrypt on Bob's
    let envelope = hex_api::encrypt(&shared_alice, message)?;
    let round_trip = match hex_api::decrypt(&shared_bob, &envelope) {
        Ok(decrypted) => decrypted.as_str() == message,
        Err(_) => false,
    };

    // Negative case: a signature from an unrelated key
    let stranger_private = hex_api::generate_private_key()?;
    let stranger_public = hex_api::derive_public_key(&stranger_private)?;
    let foreign_signature_rejected =
        !hex_api::verify(FOREIGN_SIGNATURE, FOREIGN_MESSAGE, &stranger_public);

    Ok(DemoReport {
        public_key,
        signature,
        signature_valid,
        shared_key_match,
        envelope,
        round_trip,
        foreign_signature_rejected,
    })
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn run(args: DemoArgs, out: &mut dyn Write) -> Result<Outcome> {
    info!("{}", version::get_version_string());

    let report = run_demo(&args.message).context("Pairing walkthrough aborted")?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "Public Key: {}", report.public_key)?;
        writeln!(out, "Signature: {}", report.signature)?;
        writeln!(out, "Signature Valid: {}", yes_no(report.signature_valid))?;
        writeln!(out, "SharedKey Valid: {}", yes_no(report.shared_key_match))?;
        writeln!(out, "Encrypted: {}", report.envelope)?;
        writeln!(out, "Decrypted Valid: {}", yes_no(report.round_trip))?;
        writeln!(
            out,
            "Foreign Signature Rejected: {}",
            yes_no(report.foreign_signature_rejected)
        )?;
    }

    if !report.passed() {
        bail!("Pairing walkthrough failed: {:?}", report);
    }

    info!("Pairing walkthrough passed");
    Ok(Outcome::Success)
}
