//! # CLI Interface
//!
//! Defines the command-line argument structure for `statecoin` using
//! `clap` derive. Everything is file based: keys are PEM files, states and
//! transactions are JSON files.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Statecoin key, transfer and validation tool.
#[derive(Parser, Debug)]
#[command(
    name = "statecoin",
    about = "Build and validate statecoin transactions",
    version,
    propagate_version = true
)]
pub struct StatecoinCli {
    /// Log output format. Logs always go to stderr.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "STATECOIN_LOG_FORMAT",
        default_value = "pretty"
    )]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new keypair and write it to disk.
    Keygen(KeygenArgs),
    /// Print the identity of a key file.
    Identity(IdentityArgs),
    /// Build and sign a transfer from one key to one or more identities.
    Transfer(TransferArgs),
    /// Check a transaction against a ledger snapshot.
    Validate(ValidateArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `keygen` subcommand.
#[derive(Parser, Debug)]
pub struct KeygenArgs {
    /// Where to write the PKCS#8 secret key. The identity goes next to it
    /// with a `.pub` suffix.
    #[arg(long, short = 'o')]
    pub out: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `identity` subcommand.
#[derive(Parser, Debug)]
pub struct IdentityArgs {
    /// PKCS#8 secret key file.
    #[arg(long, short = 'k', env = "STATECOIN_KEY")]
    pub key: PathBuf,
}

/// Arguments for the `transfer` subcommand.
#[derive(Parser, Debug)]
pub struct TransferArgs {
    /// PKCS#8 secret key of the paying identity.
    #[arg(long, short = 'k', env = "STATECOIN_KEY")]
    pub key: PathBuf,

    /// Recipient as `<identity.pem>=<amount>`. Repeat for more recipients.
    #[arg(long = "to", value_parser = parse_recipient)]
    pub recipients: Vec<Recipient>,

    /// Write the transaction JSON here instead of stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for the `validate` subcommand.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Ledger snapshot: a JSON object of identity -> balance.
    #[arg(long, short = 's')]
    pub state: PathBuf,

    /// Transaction JSON file.
    #[arg(long, short = 't')]
    pub tx: PathBuf,
}

/// One `--to` argument, split but not yet read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub identity_file: PathBuf,
    pub amount: u64,
}

/// Parses `<path>=<amount>`. The split is on the last `=` so paths may
/// contain one.
pub fn parse_recipient(raw: &str) -> Result<Recipient, String> {
    let (path, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected <identity.pem>=<amount>, got `{raw}`"))?;
    if path.is_empty() {
        return Err("recipient identity file is empty".to_string());
    }
    let amount = amount
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid amount `{amount}`: {e}"))?;
    Ok(Recipient {
        identity_file: PathBuf::from(path),
        amount,
    })
}

/// `--log-format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
