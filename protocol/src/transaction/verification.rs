//! Transaction validation against a ledger snapshot.
//!
//! Every transaction has to pass [`TransactionValidator::validate`] before
//! the ledger layer may apply it. The checks run in a fixed order and the
//! first failure wins:
//!
//! 1. **Sufficiency**: every debit is covered by the debited identity's
//!    balance. Unknown identities have a balance of zero.
//! 2. **Conservation**: total debited equals total credited, exactly.
//!    There are no fees, so nothing may be left over.
//! 3. **Signatures**: every debited identity has signed the decimal text
//!    of its debit.
//!
//! The cheap arithmetic runs before any elliptic-curve work, so obviously
//! broken transactions cost almost nothing to reject.
//!
//! The public verdict is a plain `bool`. [`TransactionValidator::check`]
//! returns the reason as a [`TransactionError`] for callers that want to
//! log or display it.

use thiserror::Error;
use tracing::{debug, warn};

use super::signing::verify_amount;
use super::types::{Amount, Transaction};
use crate::crypto::signatures::{EcdsaP521Sha256, SignatureError, SignatureScheme};
use crate::identity::Identity;
use crate::state::State;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a transaction was rejected.
///
/// Identities are shown by fingerprint; the full PEM text is still
/// available on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A debit exceeds the debited identity's balance.
    #[error(
        "insufficient funds: {} holds {balance}, spends {amount}",
        .identity.fingerprint()
    )]
    InsufficientFunds {
        identity: Identity,
        balance: Amount,
        amount: Amount,
    },

    /// Total debited differs from total credited.
    #[error("value not conserved: spent {spent}, created {created}")]
    ValueNotConserved { spent: Amount, created: Amount },

    /// The debits or the credits do not sum into a `u64`.
    #[error("amount overflow while summing {side}")]
    AmountOverflow { side: &'static str },

    /// A debited identity has no entry in `sign`.
    #[error("missing signature for {}", .identity.fingerprint())]
    MissingSignature { identity: Identity },

    /// A signature does not verify over the debited amount.
    #[error("invalid signature for {}", .identity.fingerprint())]
    InvalidSignature { identity: Identity },

    /// A debited identity is not a parseable public key.
    #[error("malformed identity {}: not a P-521 public key", .identity.fingerprint())]
    MalformedIdentity { identity: Identity },
}

impl TransactionError {
    /// `true` for errors caused by malformed input rather than by a ledger
    /// rule. These indicate a broken producer, not a rejected spend.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedIdentity { .. })
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates transactions with an injected signature scheme.
///
/// Holds no state besides the scheme. `validate` and `check` take shared
/// references only, so one validator can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct TransactionValidator<S = EcdsaP521Sha256> {
    scheme: S,
}

impl TransactionValidator {
    /// A validator using ECDSA/P-521/SHA-256.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SignatureScheme> TransactionValidator<S> {
    /// A validator using a caller-supplied scheme.
    pub fn with_scheme(scheme: S) -> Self {
        Self { scheme }
    }

    /// The scheme this validator verifies with.
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Accept or reject `tx` against `state`.
    ///
    /// Never panics and never mutates either argument. Every failure,
    /// including a malformed identity, is reported as `false`; use
    /// [`check`](Self::check) to learn why.
    pub fn validate(&self, state: &State, tx: &Transaction) -> bool {
        match self.check(state, tx) {
            Ok(()) => {
                debug!(
                    spenders = tx.spend.len(),
                    recipients = tx.create.len(),
                    "transaction accepted"
                );
                true
            }
            Err(err) if err.is_malformed_input() => {
                warn!(reason = %err, "transaction rejected");
                false
            }
            Err(err) => {
                debug!(reason = %err, "transaction rejected");
                false
            }
        }
    }

    /// Runs the three checks in order and returns the first failure.
    ///
    /// # Errors
    ///
    /// See [`TransactionError`]. An all-empty transaction passes.
    pub fn check(&self, state: &State, tx: &Transaction) -> Result<(), TransactionError> {
        check_sufficiency(state, tx)?;
        check_conservation(tx)?;
        self.check_signatures(tx)
    }

    fn check_signatures(&self, tx: &Transaction) -> Result<(), TransactionError> {
        for (identity, amount) in &tx.spend {
            let signature = tx
                .sign
                .get(identity)
                .ok_or_else(|| TransactionError::MissingSignature {
                    identity: identity.clone(),
                })?;

            match verify_amount(&self.scheme, identity, *amount, signature) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(TransactionError::InvalidSignature {
                        identity: identity.clone(),
                    })
                }
                Err(SignatureError::Key(_)) => {
                    return Err(TransactionError::MalformedIdentity {
                        identity: identity.clone(),
                    })
                }
                Err(SignatureError::Signing) => {
                    return Err(TransactionError::InvalidSignature {
                        identity: identity.clone(),
                    })
                }
            }
        }
        Ok(())
    }
}

fn check_sufficiency(state: &State, tx: &Transaction) -> Result<(), TransactionError> {
    for (identity, amount) in &tx.spend {
        let balance = state.balance_of(identity);
        if balance < *amount {
            return Err(TransactionError::InsufficientFunds {
                identity: identity.clone(),
                balance,
                amount: *amount,
            });
        }
    }
    Ok(())
}

fn check_conservation(tx: &Transaction) -> Result<(), TransactionError> {
    let spent = tx
        .total_spent()
        .ok_or(TransactionError::AmountOverflow { side: "spend" })?;
    let created = tx
        .total_created()
        .ok_or(TransactionError::AmountOverflow { side: "create" })?;

    // Unlike fee-paying ledgers, any surplus is a rejection too.
    if spent != created {
        return Err(TransactionError::ValueNotConserved { spent, created });
    }
    Ok(())
}

/// Validates with the default scheme.
///
/// Shorthand for `TransactionValidator::new().validate(state, tx)`.
pub fn validate_transaction(state: &State, tx: &Transaction) -> bool {
    TransactionValidator::new().validate(state, tx)
}

/// Checks with the default scheme, returning the rejection reason.
pub fn check_transaction(state: &State, tx: &Transaction) -> Result<(), TransactionError> {
    TransactionValidator::new().check(state, tx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::transaction::builder::create_transaction;
    use crate::transaction::signing::sign_amount;
    use crate::transaction::types::{AmountMap, SignatureMap};

    /// Accepts exactly the signature text "ok". Lets balance tests run
    /// without elliptic-curve work.
    struct Stub;

    impl SignatureScheme for Stub {
        fn sign(&self, _: &KeyPair, _: &[u8]) -> Result<String, SignatureError> {
            Ok("ok".to_string())
        }
        fn verify(&self, _: &Identity, _: &[u8], signature: &str) -> Result<bool, SignatureError> {
            Ok(signature == "ok")
        }
    }

    fn id(name: &str) -> Identity {
        Identity::new(name)
    }

    fn amounts(entries: &[(&str, u64)]) -> AmountMap {
        entries.iter().map(|(n, a)| (id(n), *a)).collect()
    }

    fn sigs(entries: &[(&str, &str)]) -> SignatureMap {
        entries
            .iter()
            .map(|(n, s)| (id(n), s.to_string()))
            .collect()
    }

    fn stub_tx(
        spend: &[(&str, u64)],
        create: &[(&str, u64)],
        sign: &[(&str, &str)],
    ) -> Transaction {
        Transaction::new(amounts(spend), amounts(create), sigs(sign))
    }

    fn stub_state() -> State {
        [(id("alice"), 10), (id("bob"), 5)].into_iter().collect()
    }

    /// Ten deterministic keypairs; keypair `i` holds `i` coins.
    fn ledger() -> (Vec<KeyPair>, State) {
        let keys: Vec<KeyPair> = (0..10u8)
            .map(|i| KeyPair::from_seed(&[i + 100; 32]).unwrap())
            .collect();
        let state = keys
            .iter()
            .enumerate()
            .map(|(i, kp)| (kp.identity().clone(), i as u64))
            .collect();
        (keys, state)
    }

    // -- vacuous ---------------------------------------------------------

    #[test]
    fn empty_transaction_is_valid() {
        assert!(validate_transaction(&State::new(), &Transaction::empty()));
        assert!(validate_transaction(&stub_state(), &Transaction::empty()));
    }

    // -- sufficiency -----------------------------------------------------

    #[test]
    fn rejects_overspend() {
        let tx = stub_tx(&[("bob", 6)], &[("alice", 6)], &[("bob", "ok")]);
        let v = TransactionValidator::with_scheme(Stub);

        assert_eq!(
            v.check(&stub_state(), &tx),
            Err(TransactionError::InsufficientFunds {
                identity: id("bob"),
                balance: 5,
                amount: 6,
            })
        );
        assert!(!v.validate(&stub_state(), &tx));
    }

    #[test]
    fn exact_balance_is_enough() {
        let tx = stub_tx(&[("bob", 5)], &[("alice", 5)], &[("bob", "ok")]);
        assert!(TransactionValidator::with_scheme(Stub).validate(&stub_state(), &tx));
    }

    #[test]
    fn unknown_spender_has_zero_balance() {
        let tx = stub_tx(&[("mallory", 1)], &[("alice", 1)], &[("mallory", "ok")]);
        assert!(matches!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::InsufficientFunds { balance: 0, amount: 1, .. })
        ));
    }

    #[test]
    fn unknown_spender_may_spend_zero() {
        let tx = stub_tx(&[("mallory", 0)], &[], &[("mallory", "ok")]);
        assert!(TransactionValidator::with_scheme(Stub).validate(&stub_state(), &tx));
    }

    #[test]
    fn sufficiency_runs_before_signatures() {
        // Both overspent and unsigned: the balance problem is reported.
        let tx = stub_tx(&[("bob", 12)], &[("alice", 12)], &[]);
        assert!(matches!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::InsufficientFunds { .. })
        ));
    }

    // -- conservation ----------------------------------------------------

    #[test]
    fn rejects_creating_more_than_spent() {
        let tx = stub_tx(&[("alice", 3)], &[("bob", 4)], &[("alice", "ok")]);
        assert_eq!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::ValueNotConserved { spent: 3, created: 4 })
        );
    }

    #[test]
    fn rejects_creating_less_than_spent() {
        // No fees: a surplus is not a tip, it is an error.
        let tx = stub_tx(&[("alice", 3)], &[("bob", 2)], &[("alice", "ok")]);
        assert_eq!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::ValueNotConserved { spent: 3, created: 2 })
        );
    }

    #[test]
    fn rejects_create_without_spend() {
        let tx = stub_tx(&[], &[("bob", 1)], &[]);
        assert!(!TransactionValidator::with_scheme(Stub).validate(&stub_state(), &tx));
    }

    #[test]
    fn rejects_overflowing_create() {
        let tx = Transaction::new(
            amounts(&[("alice", 1)]),
            amounts(&[("bob", u64::MAX), ("carol", 2)]),
            sigs(&[("alice", "ok")]),
        );
        assert_eq!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::AmountOverflow { side: "create" })
        );
    }

    #[test]
    fn rejects_overflowing_spend() {
        let state: State = [(id("a"), u64::MAX), (id("b"), u64::MAX)].into_iter().collect();
        let tx = Transaction::new(
            amounts(&[("a", u64::MAX), ("b", 1)]),
            amounts(&[("c", 1)]),
            sigs(&[("a", "ok"), ("b", "ok")]),
        );
        assert_eq!(
            TransactionValidator::with_scheme(Stub).check(&state, &tx),
            Err(TransactionError::AmountOverflow { side: "spend" })
        );
    }

    // -- signatures (stub) -----------------------------------------------

    #[test]
    fn rejects_missing_signature() {
        let tx = stub_tx(&[("alice", 3)], &[("bob", 3)], &[]);
        assert_eq!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::MissingSignature { identity: id("alice") })
        );
    }

    #[test]
    fn signature_for_someone_else_does_not_count() {
        let tx = stub_tx(&[("alice", 3)], &[("bob", 3)], &[("bob", "ok")]);
        assert!(matches!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::MissingSignature { .. })
        ));
    }

    #[test]
    fn extra_signatures_are_ignored() {
        let tx = Transaction::new(
            amounts(&[("alice", 3)]),
            amounts(&[("bob", 3)]),
            sigs(&[("alice", "ok"), ("carol", "garbage")]),
        );
        assert!(TransactionValidator::with_scheme(Stub).validate(&stub_state(), &tx));
    }

    #[test]
    fn every_spender_must_sign() {
        let tx = Transaction::new(
            amounts(&[("alice", 3), ("bob", 2)]),
            amounts(&[("carol", 5)]),
            sigs(&[("alice", "ok"), ("bob", "bad")]),
        );
        assert_eq!(
            TransactionValidator::with_scheme(Stub).check(&stub_state(), &tx),
            Err(TransactionError::InvalidSignature { identity: id("bob") })
        );
    }

    #[test]
    fn multiple_spenders_accepted_when_all_sign() {
        let tx = Transaction::new(
            amounts(&[("alice", 3), ("bob", 2)]),
            amounts(&[("carol", 5)]),
            sigs(&[("alice", "ok"), ("bob", "ok")]),
        );
        assert!(TransactionValidator::with_scheme(Stub).validate(&stub_state(), &tx));
    }

    // -- signatures (ECDSA) ----------------------------------------------

    #[test]
    fn accepts_hand_signed_transaction() {
        let (keys, state) = ledger();
        let six = &keys[6];
        let tx = Transaction::new(
            [(six.identity().clone(), 3)].into_iter().collect(),
            [(keys[2].identity().clone(), 3)].into_iter().collect(),
            [(six.identity().clone(), sign_amount(&EcdsaP521Sha256, six, 3).unwrap())]
                .into_iter()
                .collect(),
        );
        assert_eq!(check_transaction(&state, &tx), Ok(()));
    }

    #[test]
    fn rejects_signature_from_another_key() {
        let (keys, state) = ledger();
        let six = &keys[6];
        let tx = Transaction::new(
            [(six.identity().clone(), 3)].into_iter().collect(),
            [(keys[2].identity().clone(), 3)].into_iter().collect(),
            // Signed by identity 7, filed under identity 6.
            [(six.identity().clone(), sign_amount(&EcdsaP521Sha256, &keys[7], 3).unwrap())]
                .into_iter()
                .collect(),
        );
        assert_eq!(
            check_transaction(&state, &tx),
            Err(TransactionError::InvalidSignature {
                identity: six.identity().clone()
            })
        );
        assert!(!validate_transaction(&state, &tx));
    }

    #[test]
    fn rejects_signature_over_other_amount() {
        let (keys, state) = ledger();
        let six = &keys[6];
        let tx = Transaction::new(
            [(six.identity().clone(), 3)].into_iter().collect(),
            [(keys[2].identity().clone(), 3)].into_iter().collect(),
            [(six.identity().clone(), sign_amount(&EcdsaP521Sha256, six, 2).unwrap())]
                .into_iter()
                .collect(),
        );
        assert!(!validate_transaction(&state, &tx));
    }

    #[test]
    fn rejects_amount_tampering_after_build() {
        let (keys, state) = ledger();
        let recipients: AmountMap = [(keys[2].identity().clone(), 3)].into_iter().collect();
        let mut tx = create_transaction(&keys[9], recipients).unwrap();
        assert!(validate_transaction(&state, &tx));

        tx.create.insert(keys[2].identity().clone(), 2);
        assert!(matches!(
            check_transaction(&state, &tx),
            Err(TransactionError::ValueNotConserved { spent: 3, created: 2 })
        ));
    }

    #[test]
    fn rejects_raised_spend_after_build() {
        // Spend and create both raised to 5: balanced and affordable, but
        // the signature still covers "3".
        let (keys, state) = ledger();
        let recipients: AmountMap = [(keys[2].identity().clone(), 3)].into_iter().collect();
        let mut tx = create_transaction(&keys[9], recipients).unwrap();

        tx.spend.insert(keys[9].identity().clone(), 5);
        tx.create.insert(keys[2].identity().clone(), 5);
        assert!(matches!(
            check_transaction(&state, &tx),
            Err(TransactionError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn malformed_identity_is_rejected_not_panicking() {
        let state: State = [(id("not a key"), 10)].into_iter().collect();
        let tx = Transaction::new(
            amounts(&[("not a key", 1)]),
            amounts(&[("bob", 1)]),
            sigs(&[("not a key", "AAAA")]),
        );
        let err = check_transaction(&state, &tx).unwrap_err();
        assert!(err.is_malformed_input());
        assert!(!validate_transaction(&state, &tx));
    }

    #[test]
    fn validation_does_not_mutate_inputs() {
        let (keys, state) = ledger();
        let recipients: AmountMap = [(keys[2].identity().clone(), 3)].into_iter().collect();
        let tx = create_transaction(&keys[9], recipients).unwrap();

        let state_before = state.clone();
        let tx_before = tx.clone();
        assert!(validate_transaction(&state, &tx));
        assert_eq!(state, state_before);
        assert_eq!(tx, tx_before);
    }

    #[test]
    fn error_messages_use_fingerprints() {
        let (keys, _) = ledger();
        let err = TransactionError::MissingSignature {
            identity: keys[1].identity().clone(),
        };
        let msg = err.to_string();
        assert!(msg.contains(&keys[1].identity().fingerprint()));
        assert!(!msg.contains("BEGIN PUBLIC KEY"));
    }

    #[test]
    fn validator_is_shareable_across_threads() {
        let (keys, state) = ledger();
        let validator = TransactionValidator::new();
        let txs: Vec<Transaction> = (1..10)
            .map(|i| {
                let recipients: AmountMap =
                    [(keys[0].identity().clone(), i as u64)].into_iter().collect();
                create_transaction(&keys[i], recipients).unwrap()
            })
            .collect();

        std::thread::scope(|s| {
            for tx in &txs {
                let validator = &validator;
                let state = &state;
                s.spawn(move || assert!(validator.validate(state, tx)));
            }
        });
    }
}
