//! # Identity Codec
//!
//! An identity is the canonical text form of a P-521 public key: its
//! SubjectPublicKeyInfo exported as PEM with LF line endings.
//!
//! ```text
//! -----BEGIN PUBLIC KEY-----
//! MIGbMBAGByqGSM49AgEGBSuBBAAjA4GGAAQB...   (64 columns)
//! ...
//! -----END PUBLIC KEY-----
//! ```
//!
//! This exact text is the account key in the ledger, the key of every
//! transaction map, and the input to signature verification. OpenSSL-style
//! exporters produce byte-identical output for the same key, so identities
//! can be exchanged with other implementations as plain strings.
//!
//! The encoding is injective: equal strings mean equal keys, and
//! [`encode`] always produces the same string for the same key. Text that
//! came from elsewhere can be brought into canonical form with
//! [`Identity::parse`].

use p521::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use p521::PublicKey;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::crypto::hash::fingerprint;
use crate::crypto::keys::KeyError;

/// Encodes a public key as its canonical identity.
pub fn encode(public_key: &PublicKey) -> Result<Identity, KeyError> {
    public_key
        .to_public_key_pem(LineEnding::LF)
        .map(Identity)
        .map_err(|e| KeyError::Encoding(e.to_string()))
}

/// Decodes identity text back into a public key.
///
/// Accepts any PEM the SPKI parser accepts (e.g. CRLF line endings); the
/// text does not have to be canonical.
pub fn decode(text: &str) -> Result<PublicKey, KeyError> {
    PublicKey::from_public_key_pem(text).map_err(|_| KeyError::InvalidPublicKey)
}

/// The canonical textual form of a public key, used as the account key.
///
/// Equality, ordering and hashing are those of the underlying string.
/// `Identity` borrows as `str`, so maps keyed by identities can be queried
/// with plain string slices.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wraps identity text without checking it.
    ///
    /// Nothing is parsed here; a bogus string surfaces later as a
    /// [`KeyError::InvalidPublicKey`] when someone tries to verify against
    /// it. Use [`parse`](Self::parse) for input from outside the process.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Parses identity text and returns it in canonical form.
    pub fn parse(text: &str) -> Result<Self, KeyError> {
        encode(&decode(text)?)
    }

    /// Encodes a public key. Same as [`encode`].
    pub fn from_public_key(public_key: &PublicKey) -> Result<Self, KeyError> {
        encode(public_key)
    }

    /// Decodes the public key this identity names.
    pub fn to_public_key(&self) -> Result<PublicKey, KeyError> {
        decode(&self.0)
    }

    /// The identity text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identity and returns its text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Short hex fingerprint for logs and error messages.
    pub fn fingerprint(&self) -> String {
        fingerprint(self.0.as_bytes())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.fingerprint())
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IDENTITY_PEM_LABEL;
    use crate::crypto::keys::KeyPair;

    #[test]
    fn encoding_is_spki_pem_with_lf() {
        let kp = KeyPair::from_seed(&[3u8; 32]).unwrap();
        let text = kp.identity().as_str();

        assert!(text.starts_with(&format!("-----BEGIN {IDENTITY_PEM_LABEL}-----\n")));
        assert!(text.ends_with("-----END PUBLIC KEY-----\n"));
        assert!(!text.contains('\r'));
        for line in text.lines() {
            assert!(line.len() <= 64, "PEM body must wrap at 64 columns");
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let kp = KeyPair::from_seed(&[5u8; 32]).unwrap();
        let a = encode(&kp.public_key()).unwrap();
        let b = encode(&kp.public_key()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decode_roundtrip() {
        let kp = KeyPair::generate().unwrap();
        let pk = kp.identity().to_public_key().unwrap();
        assert_eq!(pk, kp.public_key());
    }

    #[test]
    fn parse_canonicalizes_crlf() {
        let kp = KeyPair::generate().unwrap();
        let crlf = kp.identity().as_str().replace('\n', "\r\n");
        assert_ne!(crlf, kp.identity().as_str());

        let parsed = Identity::parse(&crlf).unwrap();
        assert_eq!(&parsed, kp.identity());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Identity::parse("hello"),
            Err(KeyError::InvalidPublicKey)
        ));
    }

    #[test]
    fn new_does_not_validate() {
        let id = Identity::new("hello");
        assert_eq!(id.as_str(), "hello");
        assert!(id.to_public_key().is_err());
    }

    #[test]
    fn debug_shows_fingerprint_only() {
        let kp = KeyPair::generate().unwrap();
        let dbg = format!("{:?}", kp.identity());
        assert_eq!(dbg, format!("Identity({})", kp.identity().fingerprint()));
        assert!(!dbg.contains("BEGIN"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = Identity::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: Identity = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(Identity::new("alice"), 1u64);
        assert_eq!(map.get("alice"), Some(&1));
    }
}
