//! # Transaction Module
//!
//! Building, signing and validating statecoin transactions. A transaction
//! debits some identities, credits others, and carries a signature from
//! every debited identity.
//!
//! ## Layout
//!
//! ```text
//! types.rs        Transaction record and the amount/signature maps
//! signing.rs      the exact bytes a spend signature covers
//! builder.rs      TransactionBuilder: one source pays many recipients
//! verification.rs TransactionValidator: sufficiency, conservation, signatures
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder::build`] (or [`create_transaction`])
//!    sums the recipient amounts and signs the total with the source key.
//! 2. **Ship**: the record is plain JSON (`spend`, `create`, `sign`).
//! 3. **Validate**: [`TransactionValidator::validate`] checks it against a
//!    [`crate::state::State`] snapshot. Applying it is someone else's job.
//!
//! Amounts are `u64`. Negative amounts cannot be expressed, and sums that
//! do not fit are rejected rather than wrapped.

pub mod builder;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{create_transaction, BuildError, TransactionBuilder};
pub use signing::{sign_amount, signable_amount, verify_amount};
pub use types::{Amount, AmountMap, SignatureMap, Transaction};
pub use verification::{
    check_transaction, validate_transaction, TransactionError, TransactionValidator,
};
