/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

pub use serde::{
    Serialize,
    Deserialize,
};
pub use crate::errors::SerializationError;

///Implements functions to convert to (`to_bytes`) and from (`from_bytes`) bytes
///for plans, records and snapshots in this crate,
///so that a client can hand a plan to whatever submits it to the ledger.
#[cfg(feature = "to_bytes")]
pub trait ToBytes<'a>: Sized + Serialize + Deserialize<'a> {
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        return bincode::serialize(self)
            .map_err(|_| SerializationError::EncodingError)
    }

    fn from_bytes(bytes: &'a [u8]) -> Result<Self, SerializationError> {
        return bincode::deserialize(bytes)
            .map_err(|_| SerializationError::DecodingError)
    }
}
