/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::internal_common::*;

///Events emitted by accepted ledger operations.
///
///Commitments are lowercase `0x` hex without leading zeros, amounts are canonical decimal text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerEvent {
    ///Emitted by both `confidential_transfer` and `confidential_transfer_from`.
    ConfidentialTransfer {
        from: Address,
        to: Address,
        amount_commitment: String,
        tx_id: u64
    },
    ConfidentialApprove {
        owner: Address,
        spender: Address,
        allowance_commitment: String,
        tx_id: u64
    },
    MintCommitment {
        to: Address,
        amount: String,
        amount_commitment: String,
        tx_id: u64
    },
    BurnCommitment {
        from: Address,
        amount: String,
        amount_commitment: String,
        tx_id: u64
    }

} impl LedgerEvent {
    pub fn tx_id(&self) -> u64 {
        return match self {
            Self::ConfidentialTransfer { tx_id, .. }
            | Self::ConfidentialApprove { tx_id, .. }
            | Self::MintCommitment { tx_id, .. }
            | Self::BurnCommitment { tx_id, .. } => *tx_id
        }
    }

    ///The event name as a host would log it.
    pub fn name(&self) -> &'static str {
        return match self {
            Self::ConfidentialTransfer { .. } => "ConfidentialTransfer",
            Self::ConfidentialApprove { .. } => "ConfidentialApprove",
            Self::MintCommitment { .. } => "MintCommitment",
            Self::BurnCommitment { .. } => "BurnCommitment"
        }
    }

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for LedgerEvent {}

///Receives events from the ledger, in emission order.
pub trait EventSink {
    fn emit(&mut self, event: LedgerEvent);
}

impl EventSink for Vec<LedgerEvent> {
    fn emit(&mut self, event: LedgerEvent) {
        self.push(event);
    }
}
