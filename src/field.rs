/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Modular arithmetic over a large prime field

use std::fmt;

use crypto_bigint::{
    modular::runtime_mod::{
        DynResidue,
        DynResidueParams
    },
    Encoding,
    NonZero,
    RandomMod
};
pub use crypto_bigint::U256;
use rand::thread_rng;

use crate::errors::ParamsError;

///The field modulus `p = 2^255 - 19`.
pub const P: U256 = U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");

const LIMBS: usize = U256::LIMBS;

///An odd modulus together with its precomputed Montgomery parameters.
#[derive(Clone, Copy)]
pub struct Modulus {
    value: U256,
    params: DynResidueParams<LIMBS>

} impl Modulus {
    ///Prepare `value` for modular arithmetic.
    ///
    ///`value` must be odd and greater than 2.
    pub fn new(value: U256) -> Result<Self, ParamsError> {
        if !value.bit_vartime(0) || value <= U256::from_u64(2) {
            return Err(ParamsError::InvalidModulus);
        }
        return Ok(Self {
            value,
            params: DynResidueParams::new(&value)
        })
    }

    ///The raw modulus.
    pub fn value(&self) -> U256 {
        return self.value
    }

} impl fmt::Debug for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_tuple("Modulus").field(&self.value).finish()
    }

} impl PartialEq for Modulus {
    fn eq(&self, other: &Self) -> bool {
        return self.value == other.value
    }

} impl Eq for Modulus {}

lazy_static! {
    ///The prime field modulus, prepared for arithmetic.
    pub static ref FIELD: Modulus = Modulus::new(P)
        .expect("2^255 - 19 is an odd prime");
}

///`a * b mod m`
pub fn mod_mul(a: &U256, b: &U256, modulus: &Modulus) -> U256 {
    let a = DynResidue::new(a, modulus.params);
    let b = DynResidue::new(b, modulus.params);
    return a.mul(&b).retrieve()
}

///`base^exponent mod m` by square-and-multiply.
///
///`exponent == 0` yields `1` unconditionally, including for `base == 0`.
pub fn mod_exp(base: &U256, exponent: &U256, modulus: &Modulus) -> U256 {
    if *exponent == U256::ZERO {
        return U256::ONE;
    }

    let mut result = DynResidue::one(modulus.params);
    //reduced into [0, m) by the Montgomery conversion
    let mut square = DynResidue::new(base, modulus.params);
    for i in 0..exponent.bits_vartime() {
        if exponent.bit_vartime(i) {
            result = result.mul(&square);
        }
        square = square.square();
    }
    return result.retrieve()
}

///`x^-1 mod m` via Fermat's little theorem: `x^(m-2)`.
///
///Only meaningful for a prime modulus and `x != 0 mod m`.
///Callers must guard against `x == 0`, for which this returns `0`.
pub fn mod_inverse(x: &U256, modulus: &Modulus) -> U256 {
    return mod_exp(x, &modulus.value.wrapping_sub(&U256::from_u64(2)), modulus)
}

///`x mod m` for an arbitrary non-zero `m`.
pub fn reduce(x: &U256, modulus: &NonZero<U256>) -> U256 {
    return x.rem(modulus)
}

///Wrap `value` as a non-zero divisor.
pub(crate) fn non_zero(value: U256) -> Result<NonZero<U256>, ParamsError> {
    return Option::from(NonZero::new(value)).ok_or(ParamsError::InvalidModulus)
}

///Uniformly random integer in `[0, bound)`, drawn from a CSPRNG.
pub fn random_below(bound: &NonZero<U256>) -> U256 {
    return U256::random_mod(&mut thread_rng(), bound)
}

///Render `x` the way the ledger renders commitments in events:
///lowercase hex with a `0x` prefix and no leading zeros.
pub fn to_hex(x: &U256) -> String {
    let encoded = hex::encode(x.to_be_bytes());
    let trimmed = encoded.trim_start_matches('0');
    if trimmed.is_empty() {
        return "0x0".to_string();
    }
    return format!("0x{trimmed}")
}

///Parse a big-endian hex integer (with or without `0x`) of at most 64 digits.
pub fn from_hex(s: &str) -> Option<U256> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.is_empty() || digits.len() > 64 {
        return None;
    }
    let padded = format!("{digits:0>64}");
    let bytes: [u8; 32] = hex::decode(padded).ok()?.try_into().ok()?;
    return Some(U256::from_be_bytes(bytes))
}
