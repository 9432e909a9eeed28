//! # Protocol Configuration & Constants
//!
//! Every magic number in statecoin lives here. If you're hardcoding a
//! constant somewhere else, move it here and reference it.
//!
//! Most of these values are part of the interoperability contract: a
//! transaction signed by one implementation has to verify in another, which
//! only works if both agree on the curve, the digest, the payload text and
//! the signature encoding. Treat changes here as breaking changes.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full protocol version string.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Named curve used for every key in the system.
pub const CURVE_NAME: &str = "P-521";

/// Message digest applied to the signed payload before ECDSA.
pub const DIGEST_ALGORITHM: &str = "SHA-256";

/// Human-readable name of the full signature scheme.
pub const SIGNATURE_SCHEME: &str = "ECDSA-P521-SHA256";

/// Size of a P-521 field element / scalar in bytes (521 bits, rounded up).
pub const FIELD_BYTES: usize = 66;

/// SHA-256 digest length in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Upper bound for a DER-encoded P-521 ECDSA signature.
///
/// SEQUENCE header (3) + two INTEGERs of at most 66 bytes each with a
/// possible leading zero and a 2-byte header: 3 + 2 * (2 + 67) = 141.
pub const MAX_DER_SIGNATURE_LENGTH: usize = 141;

// ---------------------------------------------------------------------------
// Encodings
// ---------------------------------------------------------------------------

/// PEM label of an identity (SubjectPublicKeyInfo).
pub const IDENTITY_PEM_LABEL: &str = "PUBLIC KEY";

/// PEM label of an exported secret key (PKCS#8).
pub const SECRET_KEY_PEM_LABEL: &str = "PRIVATE KEY";

/// Number of hex characters shown when an identity is abbreviated in logs
/// and error messages.
pub const FINGERPRINT_HEX_LENGTH: usize = 16;
