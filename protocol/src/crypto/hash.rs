//! # Hashing Utilities
//!
//! The two SHA-2 variants statecoin needs, and nothing else:
//!
//! - **SHA-256**: the message digest of the signature scheme, and the
//!   basis of identity fingerprints.
//! - **SHA-512**: only used to stretch a 32-byte seed into P-521 secret
//!   scalar material in [`super::keys::KeyPair::from_seed`].

use sha2::{Digest, Sha256, Sha512};

use crate::config::{DIGEST_LENGTH, FINGERPRINT_HEX_LENGTH};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use statecoin_protocol::crypto::sha256;
///
/// let hash = sha256(b"statecoin");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-512 hash of the input data.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short hex fingerprint of arbitrary bytes: the first
/// [`FINGERPRINT_HEX_LENGTH`] hex characters of their SHA-256.
///
/// Used to keep multi-line PEM identities out of log lines. Never use a
/// fingerprint as a lookup key; 64 bits are plenty for humans and nowhere
/// near enough for collision resistance.
pub fn fingerprint(data: &[u8]) -> String {
    let mut hex_str = hex::encode(sha256(data));
    hex_str.truncate(FINGERPRINT_HEX_LENGTH);
    hex_str
}
