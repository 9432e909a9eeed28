//! Transaction construction.
//!
//! The [`TransactionBuilder`] turns "this keypair pays these recipients"
//! into a complete, signed [`Transaction`]:
//!
//! ```text
//! recipients = { bob: 3, carol: 1 }
//!
//! spend  = { alice: 4 }              // sum of recipient amounts
//! create = { bob: 3, carol: 1 }      // recipients, unchanged
//! sign   = { alice: sign("4") }      // alice's key over the decimal total
//! ```
//!
//! The builder never looks at a ledger, so it cannot tell whether the
//! source can afford the transfer. That is the validator's job.

use thiserror::Error;
use tracing::info;

use super::signing::sign_amount;
use super::types::{checked_sum, AmountMap, SignatureMap, Transaction};
use crate::crypto::keys::KeyPair;
use crate::crypto::signatures::{EcdsaP521Sha256, SignatureError, SignatureScheme};

/// Errors that can occur while building a transaction.
///
/// Neither happens for well-formed input: amounts that fit in a `u64`
/// once summed, and a working secret key.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The recipient amounts do not sum into a `u64`.
    #[error("recipient amounts overflow u64")]
    AmountOverflow,

    /// The signature scheme failed to sign.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Builds single-source transactions with an injected signature scheme.
///
/// # Usage
///
/// ```rust,no_run
/// use statecoin_protocol::crypto::KeyPair;
/// use statecoin_protocol::transaction::{AmountMap, TransactionBuilder};
///
/// let alice = KeyPair::generate().unwrap();
/// let bob = KeyPair::generate().unwrap();
///
/// let mut recipients = AmountMap::new();
/// recipients.insert(bob.identity().clone(), 3);
///
/// let tx = TransactionBuilder::new().build(&alice, recipients).unwrap();
/// assert_eq!(tx.spend[alice.identity()], 3);
/// ```
///
/// The builder is stateless apart from its scheme and can be shared
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder<S = EcdsaP521Sha256> {
    scheme: S,
}

impl TransactionBuilder {
    /// A builder using ECDSA/P-521/SHA-256.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SignatureScheme> TransactionBuilder<S> {
    /// A builder using a caller-supplied scheme.
    pub fn with_scheme(scheme: S) -> Self {
        Self { scheme }
    }

    /// The scheme this builder signs with.
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Builds and signs a transaction paying `recipients` from `source`.
    ///
    /// 1. `total = sum(recipients)` (0 for no recipients).
    /// 2. `create = recipients`.
    /// 3. `spend = { source: total }`.
    /// 4. `sign = { source: sign(decimal(total)) }`.
    ///
    /// # Errors
    ///
    /// [`BuildError::AmountOverflow`] if the recipient amounts overflow,
    /// [`BuildError::Signature`] if signing fails.
    pub fn build(
        &self,
        source: &KeyPair,
        recipients: AmountMap,
    ) -> Result<Transaction, BuildError> {
        let total = checked_sum(recipients.values()).ok_or(BuildError::AmountOverflow)?;
        let signature = sign_amount(&self.scheme, source, total)?;

        let source_id = source.identity().clone();
        let mut spend = AmountMap::new();
        spend.insert(source_id.clone(), total);
        let mut sign = SignatureMap::new();
        sign.insert(source_id, signature);

        info!(
            source = %source.identity().fingerprint(),
            recipients = recipients.len(),
            total,
            "transaction built"
        );

        Ok(Transaction {
            spend,
            create: recipients,
            sign,
        })
    }
}

/// Builds a transaction with the default scheme.
///
/// Shorthand for `TransactionBuilder::new().build(source, recipients)`.
pub fn create_transaction(
    source: &KeyPair,
    recipients: AmountMap,
) -> Result<Transaction, BuildError> {
    TransactionBuilder::new().build(source, recipients)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
