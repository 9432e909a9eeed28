//! Subcommand implementations.
//!
//! Each function does the file I/O for one subcommand and hands back a
//! value; printing and exit codes are left to `main`. That keeps them
//! testable against a temp directory.

use anyhow::{bail, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

use statecoin_protocol::transaction::{AmountMap, Transaction, TransactionError};
use statecoin_protocol::{Identity, KeyPair, State, TransactionBuilder, TransactionValidator};

use crate::cli::Recipient;

/// Path of the identity file written next to a secret key.
pub fn public_key_path(key: &Path) -> PathBuf {
    let mut name = key.as_os_str().to_owned();
    name.push(".pub");
    PathBuf::from(name)
}

/// Generates a keypair and writes `<out>` (secret) and `<out>.pub`
/// (identity).
pub fn keygen(out: &Path, force: bool) -> Result<Identity> {
    let keypair = KeyPair::generate().context("failed to generate keypair")?;
    let pem = keypair
        .to_pkcs8_pem()
        .context("failed to encode secret key")?;

    let pub_path = public_key_path(out);
    if !force && pub_path.exists() {
        bail!("refusing to overwrite {}", pub_path.display());
    }

    write_secret_file(out, pem.as_bytes(), force)?;
    fs::write(&pub_path, keypair.identity().as_str())
        .with_context(|| format!("failed to write identity to {}", pub_path.display()))?;

    tracing::info!(
        fingerprint = %keypair.identity().fingerprint(),
        key_path = %out.display(),
        "keypair generated"
    );
    Ok(keypair.identity().clone())
}

/// Loads a PKCS#8 PEM secret key.
pub fn load_keypair(path: &Path) -> Result<KeyPair> {
    let pem = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("failed to read key file {}", path.display()))?,
    );
    KeyPair::from_pkcs8_pem(&pem)
        .with_context(|| format!("{} is not a PKCS#8 P-521 secret key", path.display()))
}

/// Loads an identity file and returns its canonical form.
pub fn load_identity(path: &Path) -> Result<Identity> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read identity file {}", path.display()))?;
    Identity::parse(text.trim())
        .with_context(|| format!("{} is not a P-521 public key", path.display()))
}

/// Builds and signs a transfer from `key` to `recipients`.
pub fn transfer(key: &Path, recipients: &[Recipient]) -> Result<Transaction> {
    let source = load_keypair(key)?;

    let mut amounts = AmountMap::new();
    for recipient in recipients {
        let identity = load_identity(&recipient.identity_file)?;
        if amounts.insert(identity, recipient.amount).is_some() {
            bail!(
                "{} names a recipient that is already listed",
                recipient.identity_file.display()
            );
        }
    }

    TransactionBuilder::new()
        .build(&source, amounts)
        .context("failed to build transaction")
}

/// Loads a state snapshot and a transaction and checks one against the
/// other.
///
/// The outer `Result` is about reading the files; the inner one is the
/// verdict.
pub fn validate(state: &Path, tx: &Path) -> Result<std::result::Result<(), TransactionError>> {
    let state_json = fs::read_to_string(state)
        .with_context(|| format!("failed to read state file {}", state.display()))?;
    let state = State::from_json(&state_json)
        .with_context(|| format!("failed to parse state file {}", state.display()))?;

    let tx_json = fs::read_to_string(tx)
        .with_context(|| format!("failed to read transaction file {}", tx.display()))?;
    let tx = Transaction::from_json(&tx_json)
        .with_context(|| format!("failed to parse transaction file {}", tx.display()))?;

    Ok(TransactionValidator::new().check(&state, &tx))
}

/// Writes `contents` to `path`, readable by the owner only on Unix.
fn write_secret_file(path: &Path, contents: &[u8], force: bool) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("failed to create key file {}", path.display()))?;

    // `mode` above only applies on creation; an overwritten file keeps its
    // old permissions until tightened here, before the secret is written.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict permissions on {}", path.display()))?;
    }

    file.write_all(contents)
        .with_context(|| format!("failed to write key file {}", path.display()))?;
    Ok(())
}
