// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use iot_crypto::cli::{execute, init_logging, Cli, Outcome};

fn main() {
    // Pick up IOT_* keys from a local .env when present
    dotenv::dotenv().ok();

    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute the command
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match execute(cli, &mut out) {
        Ok(Outcome::Success) => {}
        Ok(Outcome::Invalid) => std::process::exit(2),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
