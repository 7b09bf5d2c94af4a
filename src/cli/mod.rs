// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;
pub mod demo;

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// IoT Crypto CLI
#[derive(Parser, Debug)]
#[command(name = "iot-crypto")]
#[command(version)]
#[command(about = "P-256 key pairs, ECDSA signatures, ECDH and AES-128-CCM envelopes for IoT devices", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a private key and its public key
    Keygen(commands::KeygenArgs),

    /// Derive the public key for a private key
    PublicKey(commands::PublicKeyArgs),

    /// Sign a message
    Sign(commands::SignArgs),

    /// Verify a signature (exit code 2 when invalid)
    Verify(commands::VerifyArgs),

    /// Compute the ECDH shared key with a peer
    SharedKey(commands::SharedKeyArgs),

    /// Encrypt a message into a hex envelope
    Encrypt(commands::EncryptArgs),

    /// Decrypt a hex envelope
    Decrypt(commands::DecryptArgs),

    /// Run the two-device pairing walkthrough
    Demo(demo::DemoArgs),

    /// Show build and protocol information
    Version(commands::VersionArgs),
}

/// How a successfully executed command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed
    Success,
    /// Verification ran and the signature was not valid
    Invalid,
}

/// Execute CLI command, writing its output to `out`
pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<Outcome> {
    match cli.command {
        Commands::Keygen(args) => commands::keygen(args, out),
        Commands::PublicKey(args) => commands::public_key(args, out),
        Commands::Sign(args) => commands::sign(args, out),
        Commands::Verify(args) => commands::verify(args, out),
        Commands::SharedKey(args) => commands::shared_key(args, out),
        Commands::Encrypt(args) => commands::encrypt(args, out),
        Commands::Decrypt(args) => commands::decrypt(args, out),
        Commands::Demo(args) => demo::run(args, out),
        Commands::Version(args) => commands::version(args, out),
    }
}

/// Install the tracing subscriber (`RUST_LOG`, default `info`) on stderr
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
