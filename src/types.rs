/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    iter::Product
};

use crate::internal_common::*;

use zeroize::Zeroize;

///An account identifier, as supplied by the host environment.
pub type Address = String;

///A ledger height, as supplied by the host environment.
pub type Height = u64;

///The commitment to an empty balance: the multiplicative identity.
pub const ZERO_COMMITMENT: Commitment = Commitment(U256::ONE);

///A multiplicative commitment: a field element hiding a `(value, blinding)` pair.
///
///Commitments compose under multiplication mod `p`,
///so an incoming amount is multiplied in and an outgoing amount is divided out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commitment(
    pub U256

); impl Commitment {
    ///create a commitment to `value` with blinding factor `blinding`
    pub fn commit(value: &Amount, blinding: &U256) -> Self {
        return create_commitment(value, blinding)
    }

    ///`self * other mod p`: fold `other` into this commitment.
    pub fn combine(&self, other: &Commitment) -> Self {
        return Self(mod_mul(&self.0, &other.0, &PARAMS.field))
    }

    ///`self * other^-1 mod p`: take `other` out of this commitment.
    ///
    ///`other` must not be `0 mod p`.
    pub fn remove(&self, other: &Commitment) -> Self {
        return self.combine(&other.inverse())
    }

    ///`self^-1 mod p`. The value is reduced first; `0` has no inverse and maps to `0`.
    pub fn inverse(&self) -> Self {
        return Self(mod_inverse(&self.0, &PARAMS.field))
    }

    ///Whether this value can stand for "no prior commitment": `0` is never a real commitment.
    pub fn is_zero(&self) -> bool {
        return self.0 == U256::ZERO
    }

    ///Replace an absent (`None` or `0`) commitment with `ZERO_COMMITMENT`.
    pub fn or_zero_commitment(commitment: Option<Commitment>) -> Self {
        return match commitment {
            Some(c) if !c.is_zero() => c,
            _ => ZERO_COMMITMENT
        }
    }

    ///`Some(c)` if `commitment` is present and non-zero.
    pub fn present(commitment: Option<Commitment>) -> Option<Self> {
        return commitment.filter(|c| !c.is_zero())
    }

    ///Lowercase `0x`-prefixed hex, as emitted in ledger events.
    pub fn to_hex(&self) -> String {
        return to_hex(&self.0)
    }

} impl From<U256> for Commitment {
    fn from(value: U256) -> Self {
        return Self(value)
    }

} impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.to_hex())
    }

} impl Product for Commitment {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        return iter.fold(ZERO_COMMITMENT, |acc, c| acc.combine(&c))
    }

} impl<'a> Product<&'a Commitment> for Commitment {
    fn product<I: Iterator<Item = &'a Commitment>>(iter: I) -> Self {
        return iter.fold(ZERO_COMMITMENT, |acc, c| acc.combine(c))
    }
}

#[cfg(feature = "to_bytes")] impl ToBytes<'_> for Commitment {
    fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        return Ok(crypto_bigint::Encoding::to_be_bytes(&self.0).to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        return match bytes.try_into() {
            Ok(bytes) => Ok(Self(<U256 as crypto_bigint::Encoding>::from_be_bytes(bytes))),
            Err(_) => Err(SerializationError::DecodingError)
        }
    }
}

///The private opening of a commitment: the plaintext value and its blinding factor.
///
///**This should not be publically shared.**
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Zeroize)]
pub struct Opening {
    pub value: Amount,
    pub blinding: U256

} impl Opening {
    pub fn new(value: Amount, blinding: U256) -> Self {
        return Self{value, blinding}
    }

    ///Open `value` with a fresh random blinding factor.
    pub fn random(value: Amount) -> Self {
        return Self::new(value, random_blinding())
    }

    ///Use `blinding` if given, otherwise draw a fresh one.
    pub fn with_blinding(value: Amount, blinding: Option<U256>) -> Self {
        return match blinding {
            Some(blinding) => Self::new(value, blinding),
            None => Self::random(value)
        }
    }

    ///The public commitment of this opening.
    pub fn commit(&self) -> Commitment {
        return Commitment::commit(&self.value, &self.blinding)
    }

} impl Drop for Opening {
    fn drop(&mut self) {
        //clear the blinding factor from memory
        self.zeroize()
    }

} #[cfg(feature = "to_bytes")] impl ToBytes<'_> for Opening {}
