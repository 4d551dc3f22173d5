/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::{debug, warn};

use crate::internal_common::*;
use super::{Ledger, LedgerStore, EventSink};

///Result of comparing all balance commitments against the supply commitment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplyReport {
    ///`product == expected`
    pub ok: bool,
    ///Product of every stored balance commitment, mod `p`.
    pub product: Commitment,
    ///The stored supply commitment.
    pub expected: Commitment,
    ///Number of balance records folded into `product`.
    pub accounts: usize
}

impl<S: LedgerStore, E: EventSink> Ledger<S, E> {
    ///Check that the product of all balance commitments equals the supply commitment.
    ///
    ///Every accepted operation preserves this equality, so a failing report means state was
    ///written outside the ledger's checks. Never fails, and reports
    ///`ZERO_COMMITMENT` as expected on a store without metadata.
    pub fn verify_supply_invariant(&self) -> SupplyReport {
        let mut accounts = 0;
        let product: Commitment = self.store().balances()
            .inspect(|_| accounts += 1)
            .map(|(_, record)| record.commitment)
            .product();
        let expected = self.store().metadata()
            .map_or(ZERO_COMMITMENT, |metadata| metadata.supply_commitment);

        let ok = product == expected;
        if ok {
            debug!(accounts, "supply invariant holds");
        } else {
            warn!(accounts, %product, %expected, "supply invariant violated");
        }
        return SupplyReport { ok, product, expected, accounts }
    }
}
