/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Conservation checks between commitments
//!
//!Nobody needs the plaintext amount to run these: only committed values are compared.
//!Any value is accepted as a commitment; there is no subgroup check.

use crate::types::Commitment;

///Incoming amount: `new == old * amount mod p`.
pub fn verify_addition(old: &Commitment, amount: &Commitment, new: &Commitment) -> bool {
    return old.combine(amount) == *new
}

///Outgoing amount: `old == new * amount mod p`.
///
///Equivalent to `new == old * amount^-1`, without computing an inverse.
pub fn verify_subtraction(old: &Commitment, new: &Commitment, amount: &Commitment) -> bool {
    return new.combine(amount) == *old
}
