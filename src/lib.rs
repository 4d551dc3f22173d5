/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Confidential-balance token ledger.
//!
//!Balances are never stored in the clear, only as multiplicative commitments over GF(2<sup>255</sup> - 19).
//!Every state transition is authorized by checking that the committed values compose correctly:
//!`C_old == C_new * C_amount` (outgoing) or `C_new == C_old * C_amount` (incoming).
//!
//!This is **not** a zero-knowledge system. Nothing stops a client from committing to a
//!negative or nonsensical amount, as long as the algebra is consistent.

#[macro_use]
extern crate lazy_static;


//internal modules
mod types;
pub use types::*;
mod tobytes;
#[cfg(feature = "to_bytes")]
pub use tobytes::ToBytes;


//uncommon public modules
pub mod pedersen;
pub mod hashes;
pub mod algebra;


//"normal" public modules
pub mod errors;
pub mod field;
pub mod amount;

pub mod planner;
pub mod ledger;


pub mod common {
    //! A collection of commonly-used things in this crate.
    //! Errors, types, amounts, to/from bytes, and field primitives are all included.
    //!
    //! This is intended for situations where you don't want to bother with
    //! manually specifying everything you need,
    //! and is intended for use in tests, demos, mockups, etc.
    //!
    //! Use `common::*` if you wish to automatically import everything.

    pub use crate::{
        types::*, errors::*, tobytes::*, field::*, amount::*
    };
}


mod internal_common {
    //! Similar to `common`, but for internal purposes only.
    //! This includes everything in `common`, as well as internal/less-common modules.

    pub use crate::{
        common::*, hashes::*, pedersen::*, algebra::*
    };
}
