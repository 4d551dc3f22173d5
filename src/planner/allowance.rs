/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tracing::debug;

use crate::internal_common::*;

///Arguments for `Ledger::confidential_approve`, minus the spender address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovePlan {
    pub allowance_commitment: Commitment,
    pub nonce: u64

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for ApprovePlan {}

///Plan an allowance of `allowance_amount` for a spender.
///
///Approvals overwrite: the new commitment bears no relation to any previous allowance,
///so no prior commitment is needed.
pub fn build_confidential_approve(
    allowance_amount: Amount,
    allowance_blinding: Option<U256>,
    next_nonce: u64
) -> ApprovePlan {
    let allowance_commitment = Opening::with_blinding(allowance_amount, allowance_blinding).commit();
    debug!(nonce = next_nonce, allowance_commitment = %allowance_commitment, "planned confidential approve");
    return ApprovePlan {
        allowance_commitment,
        nonce: next_nonce
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowance_is_a_plain_commitment() {
        let plan = build_confidential_approve(Amount::from(3u64), Some(U256::from_u64(555)), 4);
        assert_eq!(plan.allowance_commitment, Commitment::commit(&Amount::from(3u64), &U256::from_u64(555)));
        assert_eq!(plan.nonce, 4);
    }

    #[test]
    fn fresh_blinding_hides_repeated_amounts() {
        let first = build_confidential_approve(Amount::from(3u64), None, 1);
        let second = build_confidential_approve(Amount::from(3u64), None, 2);
        assert_ne!(first.allowance_commitment, second.allowance_commitment);
    }
}
