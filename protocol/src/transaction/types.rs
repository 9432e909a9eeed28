//! Core type definitions for statecoin transactions.
//!
//! A transaction is three maps keyed by [`Identity`]: what is debited,
//! what is credited, and the signatures that authorize the debits. These
//! maps are also the wire format, so their field names (`spend`, `create`,
//! `sign`) are part of the contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::identity::Identity;

/// A quantity of coins. Integer, non-negative, no decimals.
pub type Amount = u64;

/// Identity -> amount, used for both debits and credits.
pub type AmountMap = BTreeMap<Identity, Amount>;

/// Identity -> signature text (base64 DER for the default scheme).
pub type SignatureMap = BTreeMap<Identity, String>;

/// Sum of a set of amounts, or `None` on `u64` overflow.
pub(crate) fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a Amount>) -> Option<Amount> {
    amounts
        .into_iter()
        .try_fold(0u64, |acc, amount| acc.checked_add(*amount))
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A value-transfer record.
///
/// Produced once (by [`super::builder::TransactionBuilder`] or by hand)
/// and read-only afterward. Nothing about a `Transaction` is checked at
/// construction time; [`super::verification::TransactionValidator`] decides
/// whether it is acceptable against a given ledger snapshot.
///
/// # Wire shape
///
/// ```json
/// {
///   "spend":  { "<identity>": 4 },
///   "create": { "<identity>": 3, "<identity>": 1 },
///   "sign":   { "<identity>": "MIGIAkIB..." }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amounts debited from each identity's balance.
    pub spend: AmountMap,

    /// Amounts credited to each identity's balance.
    pub create: AmountMap,

    /// Signature authorizing each debit, keyed like `spend`.
    pub sign: SignatureMap,
}

impl Transaction {
    /// Assembles a transaction from its three maps.
    pub fn new(spend: AmountMap, create: AmountMap, sign: SignatureMap) -> Self {
        Self {
            spend,
            create,
            sign,
        }
    }

    /// The transaction that moves nothing. Always valid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if all three maps are empty.
    pub fn is_empty(&self) -> bool {
        self.spend.is_empty() && self.create.is_empty() && self.sign.is_empty()
    }

    /// Total debited, or `None` on overflow.
    pub fn total_spent(&self) -> Option<Amount> {
        checked_sum(self.spend.values())
    }

    /// Total credited, or `None` on overflow.
    pub fn total_created(&self) -> Option<Amount> {
        checked_sum(self.create.values())
    }

    /// Identities that are debited.
    pub fn spenders(&self) -> impl Iterator<Item = &Identity> {
        self.spend.keys()
    }

    /// Parse a transaction from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
