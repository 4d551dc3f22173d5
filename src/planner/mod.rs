/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Off-chain transition planning
//!
//!Given the commitments a client currently knows and a plaintext amount,
//!compute exactly the commitments the ledger will accept.
//!The ledger re-runs the same algebra against its own stored state,
//!so a plan built from stale commitments is rejected there.
//!
//!Prior commitments passed as `None` or `0` are absent. Where an absent prior is
//!allowed (a fresh receiver) it is replaced by `ZERO_COMMITMENT`; where it is not
//!(the owner and allowance of a transfer-from, the account of a burn) planning fails.
//!
//!Omitting the blinding factor draws a fresh one from a CSPRNG.
//!Reusing blinding factors across plans links amounts between observers.

mod transfer;
mod allowance;
mod supply;

pub use transfer::{
    TransferPlan,
    TransferFromPlan,
    build_confidential_transfer,
    build_confidential_transfer_from
};
pub use allowance::{
    ApprovePlan,
    build_confidential_approve
};
pub use supply::{
    MintPlan,
    BurnPlan,
    build_mint,
    build_burn
};
