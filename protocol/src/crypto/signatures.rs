//! # Digital Signatures
//!
//! ECDSA over P-521 with a SHA-256 message digest: the one scheme that
//! authorizes spends in statecoin.
//!
//! ## Why a trait?
//!
//! The builder and the validator never call the curve library directly.
//! They go through [`SignatureScheme`], which gives us:
//!
//! 1. A single place to audit all signing operations.
//! 2. A seam for tests: a validator can be exercised with a stub scheme
//!    when a test is about balances rather than cryptography.
//! 3. No process-wide crypto state. Whoever constructs a builder or a
//!    validator decides which scheme it uses.
//!
//! ## Wire format
//!
//! Signatures travel as base64 (standard alphabet, padded) of the DER
//! encoding. That is what OpenSSL-backed signers emit for
//! `sign("SHA256", payload, ecKey)`, and what we accept.
//!
//! ## SHA-256 on a 521-bit curve
//!
//! The digest is shorter than the group order, so ECDSA uses it unmodified
//! as the integer `z`. The RustCrypto prehash API insists on at least half
//! a field element of input, so the digest is left-padded with zeros to the
//! full 66 bytes before signing and verifying. Zero padding does not change
//! the integer value.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p521::ecdsa::{Signature, VerifyingKey};
use p521::elliptic_curve::sec1::ToEncodedPoint;
use p521::FieldBytes;
use thiserror::Error;

use super::hash::sha256;
use super::keys::{KeyError, KeyPair};
use crate::config::{DIGEST_LENGTH, FIELD_BYTES, MAX_DER_SIGNATURE_LENGTH};
use crate::identity::Identity;

/// Errors during signature operations.
///
/// A signature that simply does not verify is NOT an error: verification
/// returns `Ok(false)`. Errors are reserved for inputs that cannot be
/// processed at all.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signing failed")]
    Signing,

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// A signing/verification capability, injected into the builder and the
/// validator.
pub trait SignatureScheme {
    /// Signs `message` with the keypair's secret key and returns the
    /// signature in its textual wire form.
    fn sign(&self, keypair: &KeyPair, message: &[u8]) -> Result<String, SignatureError>;

    /// Checks `signature` over `message` against the public key that
    /// `signer` encodes.
    ///
    /// Returns `Ok(false)` for a well-formed request whose signature does
    /// not verify (including undecodable signature text), and `Err` only
    /// when `signer` is not a usable public key.
    fn verify(
        &self,
        signer: &Identity,
        message: &[u8],
        signature: &str,
    ) -> Result<bool, SignatureError>;
}

/// ECDSA/P-521 with SHA-256, DER signatures, base64 text.
///
/// Stateless; copy it freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EcdsaP521Sha256;

impl EcdsaP521Sha256 {
    /// SHA-256 of `message`, left-padded to a full P-521 field element.
    fn prehash(message: &[u8]) -> FieldBytes {
        let digest = sha256(message);
        let mut z = FieldBytes::default();
        z[FIELD_BYTES - DIGEST_LENGTH..].copy_from_slice(&digest);
        z
    }
}

impl SignatureScheme for EcdsaP521Sha256 {
    fn sign(&self, keypair: &KeyPair, message: &[u8]) -> Result<String, SignatureError> {
        let signature: Signature = keypair
            .signing_key()
            .sign_prehash(&Self::prehash(message))
            .map_err(|_| SignatureError::Signing)?;
        Ok(STANDARD.encode(signature.to_der().as_bytes()))
    }

    fn verify(
        &self,
        signer: &Identity,
        message: &[u8],
        signature: &str,
    ) -> Result<bool, SignatureError> {
        let public_key = signer.to_public_key()?;
        let verifying_key =
            VerifyingKey::from_sec1_bytes(public_key.to_encoded_point(false).as_bytes())
                .map_err(|_| KeyError::InvalidPublicKey)?;

        let Ok(der) = STANDARD.decode(signature) else {
            return Ok(false);
        };
        if der.len() > MAX_DER_SIGNATURE_LENGTH {
            return Ok(false);
        }
        let Ok(signature) = Signature::from_der(&der) else {
            return Ok(false);
        };

        Ok(verifying_key
            .verify_prehash(&Self::prehash(message), &signature)
            .is_ok())
    }
}

/// Sign a message with the default scheme.
///
/// # Example
///
/// ```
/// use statecoin_protocol::crypto::{sign, verify, KeyPair};
///
/// let keypair = KeyPair::generate().unwrap();
/// let signature = sign(&keypair, b"3").unwrap();
///
/// assert!(verify(keypair.identity(), b"3", &signature).unwrap());
/// ```
pub fn sign(keypair: &KeyPair, message: &[u8]) -> Result<String, SignatureError> {
    EcdsaP521Sha256.sign(keypair, message)
}

/// Verify a signature with the default scheme.
pub fn verify(signer: &Identity, message: &[u8], signature: &str) -> Result<bool, SignatureError> {
    EcdsaP521Sha256.verify(signer, message, signature)
}
