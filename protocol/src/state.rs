//! # Ledger State Snapshot
//!
//! A [`State`] maps identities to balances. It is the view a transaction is
//! validated against, and nothing more: producing it, persisting it and
//! applying accepted transactions to it are the job of whatever ledger
//! layer owns it.
//!
//! ## Absent accounts
//!
//! An identity that is not in the map has a balance of exactly zero.
//! [`State::balance_of`] makes that explicit so no caller ever compares an
//! amount against a "missing" sentinel.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::identity::Identity;

/// Immutable-by-convention ledger snapshot: identity -> balance.
///
/// Entries are kept sorted by identity text so that the JSON form is
/// stable. Insertion order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    balances: BTreeMap<Identity, u64>,
}

impl State {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `identity`, or 0 if the ledger has never heard of it.
    pub fn balance_of(&self, identity: &Identity) -> u64 {
        self.balances.get(identity).copied().unwrap_or(0)
    }

    /// Balance of `identity` if it has an entry.
    pub fn get(&self, identity: &Identity) -> Option<u64> {
        self.balances.get(identity).copied()
    }

    /// Set the balance of an identity, returning the previous one.
    ///
    /// Snapshots are assembled with this; validation never calls it.
    pub fn set_balance(&mut self, identity: Identity, balance: u64) -> Option<u64> {
        self.balances.insert(identity, balance)
    }

    /// Returns `true` if the identity has an explicit entry.
    pub fn contains(&self, identity: &Identity) -> bool {
        self.balances.contains_key(identity)
    }

    /// Number of accounts with an entry.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns `true` if the snapshot has no accounts.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterate over `(identity, balance)` in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identity, u64)> {
        self.balances.iter().map(|(id, balance)| (id, *balance))
    }

    /// Sum of all balances, or `None` if it does not fit in a `u64`.
    pub fn total_supply(&self) -> Option<u64> {
        self.balances
            .values()
            .try_fold(0u64, |acc, balance| acc.checked_add(*balance))
    }

    /// Parse a snapshot from its JSON form (an object of identity -> balance).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(Identity, u64)> for State {
    fn from_iter<I: IntoIterator<Item = (Identity, u64)>>(iter: I) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<Identity, u64>> for State {
    fn from(balances: BTreeMap<Identity, u64>) -> Self {
        Self { balances }
    }
}
