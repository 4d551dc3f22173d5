/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::BTreeMap;

use crate::internal_common::*;

///The stored commitment of an account's balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceRecord {
    pub commitment: Commitment,
    ///Height of the last accepted write.
    pub last_updated: Height,
    ///Number of accepted writes, starting at 1 for the first credit.
    pub updates: u64

} impl BalanceRecord {
    ///The record that replaces `previous` after a write of `commitment` at `height`.
    pub fn advance(previous: Option<&BalanceRecord>, commitment: Commitment, height: Height) -> Self {
        return Self {
            commitment,
            last_updated: height,
            updates: previous.map_or(0, |record| record.updates) + 1
        }
    }
}

///The stored allowance commitment of an `(owner, spender)` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovalRecord {
    pub commitment: Commitment,
    pub approved_at: Height
}

///Token metadata and the public supply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub symbol: String,
    ///The only address allowed to mint, and allowed to burn from any account.
    pub operator: Address,
    ///Plaintext supply, touched only by mint and burn.
    pub total_supply: Amount,
    ///Product of all minted amount commitments divided by all burned ones.
    pub supply_commitment: Commitment
}

///Persistent state backing a `Ledger`.
///
///Lookups return `None` for keys that were never written, which is distinct from
///a record holding any particular commitment. Setters overwrite.
///
///The ledger validates everything before its first write, so implementations
///do not need to provide rollback.
pub trait LedgerStore {
    fn balance(&self, address: &str) -> Option<BalanceRecord>;
    fn set_balance(&mut self, address: &str, record: BalanceRecord);

    fn approval(&self, owner: &str, spender: &str) -> Option<ApprovalRecord>;
    fn set_approval(&mut self, owner: &str, spender: &str, record: ApprovalRecord);

    fn nonce(&self, address: &str) -> Option<u64>;
    fn set_nonce(&mut self, address: &str, nonce: u64);

    fn metadata(&self) -> Option<Metadata>;
    fn set_metadata(&mut self, metadata: Metadata);

    ///The id the next emitted event will carry.
    fn next_tx_id(&self) -> Option<u64>;
    fn set_next_tx_id(&mut self, tx_id: u64);

    ///Every balance record, in address order.
    fn balances(&self) -> Box<dyn Iterator<Item = (&Address, &BalanceRecord)> + '_>;
}

///In-memory `LedgerStore` on ordered maps.
///
///Serializable, so a whole ledger state can be snapshotted with `to_bytes` and restored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryStore {
    balances: BTreeMap<Address, BalanceRecord>,
    approvals: BTreeMap<(Address, Address), ApprovalRecord>,
    nonces: BTreeMap<Address, u64>,
    metadata: Option<Metadata>,
    next_tx_id: Option<u64>

} impl MemoryStore {
    pub fn new() -> Self {
        return Self::default();
    }

    ///Number of accounts holding a balance record.
    pub fn accounts(&self) -> usize {
        return self.balances.len();
    }

} impl LedgerStore for MemoryStore {
    fn balance(&self, address: &str) -> Option<BalanceRecord> {
        return self.balances.get(address).copied();
    }

    fn set_balance(&mut self, address: &str, record: BalanceRecord) {
        self.balances.insert(address.to_string(), record);
    }

    fn approval(&self, owner: &str, spender: &str) -> Option<ApprovalRecord> {
        return self.approvals.get(&(owner.to_string(), spender.to_string())).copied();
    }

    fn set_approval(&mut self, owner: &str, spender: &str, record: ApprovalRecord) {
        self.approvals.insert((owner.to_string(), spender.to_string()), record);
    }

    fn nonce(&self, address: &str) -> Option<u64> {
        return self.nonces.get(address).copied();
    }

    fn set_nonce(&mut self, address: &str, nonce: u64) {
        self.nonces.insert(address.to_string(), nonce);
    }

    fn metadata(&self) -> Option<Metadata> {
        return self.metadata.clone();
    }

    fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = Some(metadata);
    }

    fn next_tx_id(&self) -> Option<u64> {
        return self.next_tx_id;
    }

    fn set_next_tx_id(&mut self, tx_id: u64) {
        self.next_tx_id = Some(tx_id);
    }

    fn balances(&self) -> Box<dyn Iterator<Item = (&Address, &BalanceRecord)> + '_> {
        return Box::new(self.balances.iter());
    }

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for MemoryStore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_not_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.balance("alice"), None);
        let record = BalanceRecord::advance(None, Commitment(U256::ZERO), 3);
        store.set_balance("alice", record);
        assert_eq!(store.balance("alice"), Some(record));
        assert_eq!(record.updates, 1);
    }

    #[test]
    fn advance_counts_updates() {
        let first = BalanceRecord::advance(None, ZERO_COMMITMENT, 1);
        let second = BalanceRecord::advance(Some(&first), ZERO_COMMITMENT, 5);
        assert_eq!(second.updates, 2);
        assert_eq!(second.last_updated, 5);
    }

    #[test]
    fn approvals_are_directional() {
        let mut store = MemoryStore::new();
        store.set_approval("alice", "bob", ApprovalRecord { commitment: ZERO_COMMITMENT, approved_at: 1 });
        assert!(store.approval("alice", "bob").is_some());
        assert!(store.approval("bob", "alice").is_none());
    }

    #[test]
    fn balances_are_ordered() {
        let mut store = MemoryStore::new();
        for name in ["carol", "alice", "bob"] {
            store.set_balance(name, BalanceRecord::advance(None, ZERO_COMMITMENT, 1));
        }
        let names: Vec<&Address> = store.balances().map(|(address, _)| address).collect();
        assert_eq!(names, vec!("alice", "bob", "carol"));
        assert_eq!(store.accounts(), 3);
    }
}
