/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::debug;

use crate::internal_common::*;

///Arguments for `Ledger::mint`, minus the recipient address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MintPlan {
    pub amount: Amount,
    pub amount_commitment: Commitment,
    pub new_receiver_commitment: Commitment,
    pub nonce: u64

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for MintPlan {}

///Arguments for `Ledger::burn`, minus the burned address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BurnPlan {
    pub amount: Amount,
    pub amount_commitment: Commitment,
    pub new_from_commitment: Commitment,
    pub nonce: u64

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for BurnPlan {}

///Plan minting `amount` into a recipient: `new_receiver = receiver * amount`.
///
///An absent receiver commitment is treated as `ZERO_COMMITMENT`.
pub fn build_mint(
    receiver_commitment: Option<Commitment>,
    amount: Amount,
    amount_blinding: Option<U256>,
    next_nonce: u64
) -> MintPlan {
    let amount_commitment = Opening::with_blinding(amount, amount_blinding).commit();
    let receiver = Commitment::or_zero_commitment(receiver_commitment);

    debug!(nonce = next_nonce, %amount, "planned mint");
    return MintPlan {
        amount,
        amount_commitment,
        new_receiver_commitment: receiver.combine(&amount_commitment),
        nonce: next_nonce
    };
}

///Plan burning `amount` out of an account: `new_from = from * amount^-1`.
///
///The account's commitment must already exist.
pub fn build_burn(
    from_commitment: Option<Commitment>,
    amount: Amount,
    amount_blinding: Option<U256>,
    next_nonce: u64
) -> Result<BurnPlan, PlanError> {
    let from = Commitment::present(from_commitment)
        .ok_or(PlanError::NoAccountCommitment)?;

    let amount_commitment = Opening::with_blinding(amount, amount_blinding).commit();

    debug!(nonce = next_nonce, %amount, "planned burn");
    return Ok(BurnPlan {
        amount,
        amount_commitment,
        new_from_commitment: from.remove(&amount_commitment),
        nonce: next_nonce
    });
}
