//! Byte-level compatibility with OpenSSL-backed signers.
//!
//! The fixtures were produced outside this crate by an OpenSSL P-521 key:
//! a PKCS#8 secret key, its SPKI PEM export, and a SHA-256 ECDSA signature
//! over the ASCII text `"3"`. If any of these tests fail, identities or
//! signatures no longer cross the implementation boundary.

use statecoin_protocol::crypto::{sign, verify, KeyPair};
use statecoin_protocol::transaction::{
    check_transaction, validate_transaction, AmountMap, SignatureMap, Transaction,
};
use statecoin_protocol::{Identity, State};

const SECRET_KEY_PEM: &str = include_str!("fixtures/openssl_p521.key.pem");
const IDENTITY_PEM: &str = include_str!("fixtures/openssl_p521.pub.pem");
const SIGNATURE_OVER_3: &str = include_str!("fixtures/openssl_p521_sig_3.b64");

fn fixture_signature() -> &'static str {
    SIGNATURE_OVER_3.trim()
}

#[test]
fn identity_matches_openssl_spki_export() {
    let keypair = KeyPair::from_pkcs8_pem(SECRET_KEY_PEM).expect("fixture key");
    assert_eq!(keypair.identity().as_str(), IDENTITY_PEM);
}

#[test]
fn parsing_openssl_identity_is_a_no_op() {
    let parsed = Identity::parse(IDENTITY_PEM).expect("fixture identity");
    assert_eq!(parsed.as_str(), IDENTITY_PEM);
}

#[test]
fn openssl_signature_verifies() {
    let identity = Identity::new(IDENTITY_PEM);
    assert!(verify(&identity, b"3", fixture_signature()).unwrap());
    assert!(!verify(&identity, b"4", fixture_signature()).unwrap());
}

#[test]
fn our_signature_verifies_under_openssl_identity() {
    let keypair = KeyPair::from_pkcs8_pem(SECRET_KEY_PEM).expect("fixture key");
    let signature = sign(&keypair, b"1000").unwrap();
    assert!(verify(&Identity::new(IDENTITY_PEM), b"1000", &signature).unwrap());
}

#[test]
fn transaction_with_openssl_signature_is_accepted() {
    let spender = Identity::new(IDENTITY_PEM);
    let recipient = KeyPair::from_seed(&[2; 32]).unwrap().identity().clone();

    let spend: AmountMap = [(spender.clone(), 3)].into_iter().collect();
    let create: AmountMap = [(recipient, 3)].into_iter().collect();
    let sign: SignatureMap = [(spender.clone(), fixture_signature().to_string())]
        .into_iter()
        .collect();
    let tx = Transaction::new(spend, create, sign);

    let state: State = [(spender, 5)].into_iter().collect();
    assert_eq!(check_transaction(&state, &tx), Ok(()));
    assert!(validate_transaction(&state, &tx));
}
