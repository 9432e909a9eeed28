// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Statecoin CLI
//!
//! Entry point for the `statecoin` binary. Parses CLI arguments,
//! initializes logging, and dispatches to a subcommand:
//!
//! - `keygen`: write a new secret key and its identity
//! - `identity`: print the identity of a secret key
//! - `transfer`: build and sign a transaction
//! - `validate`: check a transaction against a ledger snapshot
//! - `version`: print build version information
//!
//! `validate` exits with status 1 when the transaction is rejected, so it
//! can gate a shell pipeline.

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use cli::{Commands, StatecoinCli};

fn main() -> Result<ExitCode> {
    let cli = StatecoinCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format.into());

    match cli.command {
        Commands::Keygen(args) => {
            let identity = commands::keygen(&args.out, args.force)?;
            println!("Keypair generated.");
            println!("  Secret key  : {}", args.out.display());
            println!(
                "  Identity    : {}",
                commands::public_key_path(&args.out).display()
            );
            println!("  Fingerprint : {}", identity.fingerprint());
        }
        Commands::Identity(args) => {
            let keypair = commands::load_keypair(&args.key)?;
            print!("{}", keypair.identity());
        }
        Commands::Transfer(args) => {
            let tx = commands::transfer(&args.key, &args.recipients)?;
            let json = tx
                .to_json_pretty()
                .context("failed to serialize transaction")?;
            match args.out {
                Some(path) => {
                    std::fs::write(&path, json + "\n").with_context(|| {
                        format!("failed to write transaction to {}", path.display())
                    })?;
                    tracing::info!(path = %path.display(), "transaction written");
                }
                None => println!("{json}"),
            }
        }
        Commands::Validate(args) => match commands::validate(&args.state, &args.tx)? {
            Ok(()) => println!("valid"),
            Err(reason) => {
                println!("invalid: {reason}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Version => print_version(),
    }

    Ok(ExitCode::SUCCESS)
}

/// Prints binary, protocol and signature scheme versions.
fn print_version() {
    use statecoin_protocol::config::{
        CURVE_NAME, DIGEST_ALGORITHM, PROTOCOL_VERSION, SIGNATURE_SCHEME,
    };

    println!("statecoin {}", env!("CARGO_PKG_VERSION"));
    println!("protocol  {PROTOCOL_VERSION}");
    println!("scheme    {SIGNATURE_SCHEME} ({CURVE_NAME}, {DIGEST_ALGORITHM})");
}
