// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Statecoin Protocol, Core Library
//!
//! A deliberately small value-transfer protocol. There is no chain here, no
//! mempool and no consensus. There is a ledger snapshot, a transaction that
//! wants to change it, and a validator that says yes or no.
//!
//! Identities are public keys in SPKI PEM form. Spends are authorized with
//! ECDSA over P-521 and SHA-256, which is what you get from OpenSSL when
//! you ask it to sign with a P-521 key and do not think any harder.
//!
//! ## Architecture
//!
//! - **crypto**: keypairs, hashing and the pluggable [`SignatureScheme`].
//! - **identity**: the canonical text form of a public key.
//! - **state**: the identity -> balance snapshot transactions run against.
//! - **transaction**: the record, its builder and its validator.
//! - **config**: protocol constants.
//!
//! ## Quick tour
//!
//! ```rust,no_run
//! use statecoin_protocol::{
//!     AmountMap, KeyPair, State, TransactionBuilder, TransactionValidator,
//! };
//!
//! let alice = KeyPair::generate().unwrap();
//! let bob = KeyPair::generate().unwrap();
//!
//! let mut state = State::new();
//! state.set_balance(alice.identity().clone(), 10);
//!
//! let mut recipients = AmountMap::new();
//! recipients.insert(bob.identity().clone(), 3);
//! let tx = TransactionBuilder::new().build(&alice, recipients).unwrap();
//!
//! assert!(TransactionValidator::new().validate(&state, &tx));
//! ```
//!
//! ## Ground rules
//!
//! 1. Validation never mutates anything it is handed.
//! 2. No fees. Whatever is spent is created, to the unit.
//! 3. Secret material never shows up in `Debug` output or logs.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod state;
pub mod transaction;

pub use crypto::{KeyPair, SignatureScheme};
pub use identity::Identity;
pub use state::State;
pub use transaction::{
    create_transaction, validate_transaction, Amount, AmountMap, Transaction, TransactionBuilder,
    TransactionError, TransactionValidator,
};
