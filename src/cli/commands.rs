// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::Outcome;
use crate::crypto::{
    self, derive_shared_secret, hex_api, parse_private_key, PrivateKey, PublicKey,
};
use crate::version::{get_version_info, get_version_string};

/// Arguments for keygen command
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print the key pair as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for public-key command
#[derive(Args, Debug)]
pub struct PublicKeyArgs {
    /// Private key hex (can also be set via IOT_PRIVATE_KEY env var)
    #[arg(long, env = "IOT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Arguments for sign command
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Message to sign
    #[arg(long)]
    pub message: String,

    /// Private key hex (can also be set via IOT_PRIVATE_KEY env var)
    #[arg(long, env = "IOT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

/// Arguments for verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// DER signature hex
    #[arg(long)]
    pub signature: String,

    /// Message the signature covers
    #[arg(long)]
    pub message: String,

    /// Signer public key hex (can also be set via IOT_PEER_PUBLIC_KEY env var)
    #[arg(long, env = "IOT_PEER_PUBLIC_KEY")]
    pub public_key: String,
}

/// Arguments for shared-key command
#[derive(Args, Debug)]
pub struct SharedKeyArgs {
    /// Own private key hex (can also be set via IOT_PRIVATE_KEY env var)
    #[arg(long, env = "IOT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Peer public key hex (can also be set via IOT_PEER_PUBLIC_KEY env var)
    #[arg(long, env = "IOT_PEER_PUBLIC_KEY")]
    pub peer_public_key: String,
}

/// Arguments for encrypt command
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Key material, e.g. a shared key (can also be set via IOT_AEAD_KEY env var)
    #[arg(long, env = "IOT_AEAD_KEY", hide_env_values = true)]
    pub key: String,

    /// Message to encrypt
    #[arg(long)]
    pub message: String,
}

/// Arguments for decrypt command
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Key material used for encryption (can also be set via IOT_AEAD_KEY env var)
    #[arg(long, env = "IOT_AEAD_KEY", hide_env_values = true)]
    pub key: String,

    /// Hex envelope (nonce || ciphertext || tag)
    #[arg(long)]
    pub envelope: String,
}

/// Arguments for version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print build and protocol details as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON shape of a generated key pair
#[derive(Debug, Serialize)]
pub struct KeyPairOutput {
    pub private_key: String,
    pub public_key: String,
}

fn load_private_key(input: &str) -> Result<PrivateKey> {
    parse_private_key(input).context("Failed to parse private key")
}

pub fn keygen(args: KeygenArgs, out: &mut dyn Write) -> Result<Outcome> {
    let private_key = PrivateKey::generate().context("Failed to generate private key")?;
    let public_key = private_key.public_key().to_hex();
    let private_hex = private_key.to_hex();

    if args.json {
        let output = KeyPairOutput {
            private_key: private_hex.to_string(),
            public_key,
        };
        let rendered = Zeroizing::new(serde_json::to_string_pretty(&output)?);
        writeln!(out, "{}", rendered.as_str())?;
        let _wiped = Zeroizing::new(output.private_key);
    } else {
        writeln!(out, "Private Key: {}", private_hex.as_str())?;
        writeln!(out, "Public Key: {}", public_key)?;
    }

    info!("Generated new P-256 key pair");
    Ok(Outcome::Success)
}

pub fn public_key(args: PublicKeyArgs, out: &mut dyn Write) -> Result<Outcome> {
    let private_key = load_private_key(&args.private_key)?;
    writeln!(out, "{}", private_key.public_key().to_hex())?;
    Ok(Outcome::Success)
}

pub fn sign(args: SignArgs, out: &mut dyn Write) -> Result<Outcome> {
    let private_key = load_private_key(&args.private_key)?;
    let signature = crypto::sign(args.message.as_bytes(), &private_key)
        .context("Failed to sign message")?;
    writeln!(out, "{}", signature.to_hex())?;
    Ok(Outcome::Success)
}

pub fn verify(args: VerifyArgs, out: &mut dyn Write) -> Result<Outcome> {
    let valid = hex_api::verify(&args.signature, &args.message, &args.public_key);
    writeln!(out, "Signature Valid: {}", if valid { "Yes" } else { "No" })?;

    if valid {
        Ok(Outcome::Success)
    } else {
        warn!("Signature did not verify");
        Ok(Outcome::Invalid)
    }
}

pub fn shared_key(args: SharedKeyArgs, out: &mut dyn Write) -> Result<Outcome> {
    let private_key = load_private_key(&args.private_key)?;
    let peer_public_key =
        PublicKey::from_hex(&args.peer_public_key).context("Failed to parse peer public key")?;
    let shared = derive_shared_secret(&private_key, &peer_public_key);
    writeln!(out, "{}", shared.to_hex().as_str())?;
    Ok(Outcome::Success)
}

pub fn encrypt(args: EncryptArgs, out: &mut dyn Write) -> Result<Outcome> {
    let envelope =
        hex_api::encrypt(&args.key, &args.message).context("Failed to encrypt message")?;
    writeln!(out, "{}", envelope)?;
    Ok(Outcome::Success)
}

pub fn decrypt(args: DecryptArgs, out: &mut dyn Write) -> Result<Outcome> {
    let plaintext =
        hex_api::decrypt(&args.key, &args.envelope).context("Failed to decrypt envelope")?;
    writeln!(out, "{}", plaintext.as_str())?;
    Ok(Outcome::Success)
}

pub fn version(args: VersionArgs, out: &mut dyn Write) -> Result<Outcome> {
    if args.json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&get_version_info())?
        )?;
    } else {
        writeln!(out, "{}", get_version_string())?;
    }
    Ok(Outcome::Success)
}
