//! # Identity Module
//!
//! Every account on the ledger is named by an [`Identity`]: the canonical
//! SPKI PEM text of a P-521 public key. There is no address layer, no
//! hashing and no checksum on top; the key text *is* the account.
//!
//! ## Design Decisions
//!
//! - Identities are compared as strings. Raw key objects are never used as
//!   map keys, so equality does not depend on any curve library's notion
//!   of point equality.
//! - The PEM form is what OpenSSL exports, which keeps identities
//!   interchangeable with other implementations.

pub mod codec;

pub use codec::{decode, encode, Identity};
