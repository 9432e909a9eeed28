//! # Cryptographic Primitives for statecoin
//!
//! Every signing operation and every hash flows through here.
//!
//! - **ECDSA over P-521** for spend authorization.
//! - **SHA-256** as the signature digest and for identity fingerprints.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here is a thin, type-safe wrapper around the
//! RustCrypto `p521`/`ecdsa` implementations. The only decisions made in
//! this module are encodings, and those are pinned by
//! [`crate::config`].

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{fingerprint, sha256};
pub use keys::{KeyError, KeyPair};
pub use signatures::{sign, verify, EcdsaP521Sha256, SignatureError, SignatureScheme};
