/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::debug;

use crate::internal_common::*;

///Arguments for `Ledger::confidential_transfer`, minus the recipient address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferPlan {
    pub amount_commitment: Commitment,
    pub new_sender_commitment: Commitment,
    pub new_receiver_commitment: Commitment,
    pub nonce: u64

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for TransferPlan {}

///Arguments for `Ledger::confidential_transfer_from`, minus the owner and recipient addresses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferFromPlan {
    pub amount_commitment: Commitment,
    pub new_owner_commitment: Commitment,
    pub new_receiver_commitment: Commitment,
    pub new_allowance_commitment: Commitment,
    pub nonce: u64

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for TransferFromPlan {}

///Plan a transfer of `amount` from the caller to a recipient.
///
///`new_sender = sender * amount^-1`, `new_receiver = receiver * amount`.
///An absent sender or receiver commitment is treated as `ZERO_COMMITMENT`.
pub fn build_confidential_transfer(
    sender_commitment: Option<Commitment>,
    receiver_commitment: Option<Commitment>,
    amount: Amount,
    amount_blinding: Option<U256>,
    next_nonce: u64
) -> TransferPlan {
    let amount_commitment = Opening::with_blinding(amount, amount_blinding).commit();

    let sender = Commitment::or_zero_commitment(sender_commitment);
    let receiver = Commitment::or_zero_commitment(receiver_commitment);

    let inverse = amount_commitment.inverse();
    let plan = TransferPlan {
        amount_commitment,
        new_sender_commitment: sender.combine(&inverse),
        new_receiver_commitment: receiver.combine(&amount_commitment),
        nonce: next_nonce
    };
    debug!(nonce = next_nonce, amount_commitment = %amount_commitment, "planned confidential transfer");
    return plan;
}

///Plan a spender moving `amount` out of an owner's balance under an allowance.
///
///The owner and recipient are updated as in a transfer, and
///`new_allowance = allowance * amount^-1`.
///Both the owner's commitment and the allowance must already exist.
pub fn build_confidential_transfer_from(
    owner_commitment: Option<Commitment>,
    receiver_commitment: Option<Commitment>,
    allowance_commitment: Option<Commitment>,
    amount: Amount,
    amount_blinding: Option<U256>,
    next_nonce: u64
) -> Result<TransferFromPlan, PlanError> {
    let owner = Commitment::present(owner_commitment)
        .ok_or(PlanError::NoOwnerCommitment)?;
    let allowance = Commitment::present(allowance_commitment)
        .ok_or(PlanError::NoAllowance)?;
    let receiver = Commitment::or_zero_commitment(receiver_commitment);

    let amount_commitment = Opening::with_blinding(amount, amount_blinding).commit();
    let inverse = amount_commitment.inverse();

    let plan = TransferFromPlan {
        amount_commitment,
        new_owner_commitment: owner.combine(&inverse),
        new_receiver_commitment: receiver.combine(&amount_commitment),
        new_allowance_commitment: allowance.combine(&inverse),
        nonce: next_nonce
    };
    debug!(nonce = next_nonce, amount_commitment = %amount_commitment, "planned confidential transfer-from");
    return Ok(plan);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_parties_start_at_identity() {
        let plan = build_confidential_transfer(None, Some(Commitment(U256::ZERO)), Amount::from(1u64), Some(U256::from_u64(9)), 1);
        assert_eq!(plan.new_receiver_commitment, plan.amount_commitment);
        assert_eq!(plan.new_sender_commitment, plan.amount_commitment.inverse());
    }

    #[test]
    fn transfer_from_checks_owner_first() {
        let err = build_confidential_transfer_from(None, None, None, Amount::from(1u64), None, 1);
        assert_eq!(err, Err(PlanError::NoOwnerCommitment));
        let err = build_confidential_transfer_from(Some(ZERO_COMMITMENT), None, Some(Commitment(U256::ZERO)), Amount::from(1u64), None, 1);
        assert_eq!(err, Err(PlanError::NoAllowance));
    }
}
