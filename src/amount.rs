/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Plaintext token amounts
//!
//! The commitment exponent of an amount is derived from its textual form,
//! so every party must render the same logical number identically.
//! `Amount` fixes that rendering: trailing fractional zeros are dropped,
//! so `3`, `3.0` and `3.000` all produce the same text (`3`) and the same commitment.

use std::{
    fmt,
    str::FromStr
};

use serde::{
    de,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer
};
use zeroize::Zeroize;

use crate::errors::AmountError;

///Number of fractional digits an `Amount` can carry.
pub const DECIMALS: u32 = 18;
const SCALE: i128 = 10i128.pow(DECIMALS);

///A signed fixed-point decimal amount with `DECIMALS` fractional digits.
///
///Negative amounts are representable: nothing in the ledger proves that a
///committed amount is non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroize)]
pub struct Amount(i128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    ///Build from a count of the smallest representable units (10<sup>-18</sup>).
    pub const fn from_atoms(atoms: i128) -> Self {
        return Self(atoms);
    }

    ///The amount in units of 10<sup>-18</sup>.
    pub const fn atoms(&self) -> i128 {
        return self.0;
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        return self.0.checked_add(other.0).map(Amount);
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        return self.0.checked_sub(other.0).map(Amount);
    }

    pub fn is_negative(&self) -> bool {
        return self.0 < 0;
    }

} impl From<u64> for Amount {
    fn from(whole: u64) -> Self {
        return Self(i128::from(whole) * SCALE);
    }

} impl From<i64> for Amount {
    fn from(whole: i64) -> Self {
        return Self(i128::from(whole) * SCALE);
    }

} impl From<u32> for Amount {
    fn from(whole: u32) -> Self {
        return Self(i128::from(whole) * SCALE);
    }

} impl FromStr for Amount {
    type Err = AmountError;

    ///Parse `[-]digits[.digits]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s)
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, "")
        };

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return Err(AmountError::Malformed(s.to_string()));
        }
        if fraction.len() > DECIMALS as usize {
            return Err(AmountError::TooManyDecimals(s.to_string()));
        }

        let mut atoms: i128 = 0;
        let padded = format!("{fraction:0<width$}", width = DECIMALS as usize);
        for digit in whole.bytes().chain(padded.bytes()) {
            atoms = atoms.checked_mul(10)
                .and_then(|a| a.checked_add(i128::from(digit - b'0')))
                .ok_or(AmountError::Overflow)?;
        }
        if negative {
            atoms = -atoms;
        }
        return Ok(Self(atoms));
    }

} impl fmt::Display for Amount {
    ///Canonical text: no exponent, no trailing fractional zeros, no trailing point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let scale = SCALE.unsigned_abs();
        let whole = magnitude / scale;
        let fraction = magnitude % scale;
        if fraction == 0 {
            return write!(f, "{sign}{whole}");
        }
        let digits = format!("{fraction:0>width$}", width = DECIMALS as usize);
        return write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'));
    }

} impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        return serializer.serialize_str(&self.to_string());
    }

} impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        return text.parse().map_err(de::Error::custom);
    }
}
