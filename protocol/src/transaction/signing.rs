//! The signed payload of a spend.
//!
//! A spend signature covers exactly one thing: the debited amount written
//! as a decimal string. `4` is signed as the ASCII bytes `"4"`, `1000` as
//! `"1000"`. No leading zeros, no separators, no fixed-width binary. Every
//! implementation that wants its signatures to cross-verify has to produce
//! these bytes exactly.
//!
//! Note what is *not* covered: the recipients, the other spenders, any
//! nonce. Replay protection belongs to the ledger layer.

use super::types::Amount;
use crate::crypto::keys::KeyPair;
use crate::crypto::signatures::{SignatureError, SignatureScheme};
use crate::identity::Identity;

/// The bytes a spend signature covers.
pub fn signable_amount(amount: Amount) -> Vec<u8> {
    amount.to_string().into_bytes()
}

/// Signs `amount` on behalf of `keypair`.
pub fn sign_amount<S: SignatureScheme + ?Sized>(
    scheme: &S,
    keypair: &KeyPair,
    amount: Amount,
) -> Result<String, SignatureError> {
    scheme.sign(keypair, &signable_amount(amount))
}

/// Checks that `signature` authorizes debiting `amount` from `identity`.
pub fn verify_amount<S: SignatureScheme + ?Sized>(
    scheme: &S,
    identity: &Identity,
    amount: Amount,
    signature: &str,
) -> Result<bool, SignatureError> {
    scheme.verify(identity, &signable_amount(amount), signature)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
