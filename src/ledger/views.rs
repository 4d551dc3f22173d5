/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::internal_common::*;
use super::store::{BalanceRecord, ApprovalRecord};

///Read-only view of an account's balance commitment.
///
///Absent accounts read as `exists == false` with `ZERO_COMMITMENT`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceView {
    pub address: Address,
    pub exists: bool,
    pub commitment: Commitment,
    pub last_updated: Height,
    pub updates: u64

} impl BalanceView {
    pub(crate) fn new(address: &str, record: Option<BalanceRecord>) -> Self {
        return match record {
            Some(record) => Self {
                address: address.to_string(),
                exists: true,
                commitment: record.commitment,
                last_updated: record.last_updated,
                updates: record.updates
            },
            None => Self {
                address: address.to_string(),
                exists: false,
                commitment: ZERO_COMMITMENT,
                last_updated: 0,
                updates: 0
            }
        }
    }
}

///Read-only view of an allowance commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovalView {
    pub owner: Address,
    pub spender: Address,
    pub exists: bool,
    pub commitment: Commitment,
    pub approved_at: Height

} impl ApprovalView {
    pub(crate) fn new(owner: &str, spender: &str, record: Option<ApprovalRecord>) -> Self {
        let (exists, commitment, approved_at) = match record {
            Some(record) => (true, record.commitment, record.approved_at),
            None => (false, ZERO_COMMITMENT, 0)
        };
        return Self {
            owner: owner.to_string(),
            spender: spender.to_string(),
            exists,
            commitment,
            approved_at
        }
    }
}
