/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Pedersen-like commitment generators and parameters
//!
//!Commitments have the form `g^H(value) * h^blinding mod p`.
//!`g` and `h` are derived by hashing fixed tags, so every implementation
//!that uses the same hash, prefix and encoding arrives at the same bases.
//!
//!No subgroup or generator-validity checks are performed on exponents or
//!commitments supplied from outside.

use crypto_bigint::NonZero;
use tracing::debug;

use crate::internal_common::*;

///Tag of the value generator `g`.
pub const G_TAG: &str = "g";
///Tag of the blinding generator `h`.
pub const H_TAG: &str = "h";

lazy_static! {
    ///Process-wide commitment parameters, derived once on first use.
    pub static ref PARAMS: CommitmentParams = CommitmentParams::derive()
        .expect("generator derivation over 2^255 - 19 is valid");
    ///The value generator `g`.
    pub static ref PEDERSEN_G: U256 = PARAMS.g;
    ///The blinding generator `h`.
    pub static ref PEDERSEN_H: U256 = PARAMS.h;
}

///Derive a base in `[2, p-2]` from `SHA3-256("XCTOK:gen:" || tag)`.
///
///The first 16 bytes of the digest are read big-endian and reduced by
///`value mod (p - 3) + 2`.
pub fn map_to_base(tag: &str, base_range: &NonZero<U256>) -> U256 {
    let value = domain_h_int(tag.as_bytes(), domains::GENERATOR);
    return reduce(&value, base_range).wrapping_add(&U256::from_u64(2));
}

///Immutable context for commitment arithmetic: the field and both generators.
#[derive(Debug, Clone)]
pub struct CommitmentParams {
    pub field: Modulus,
    pub g: U256,
    pub h: U256,
    //p - 1, the exponent range
    order: NonZero<U256>

} impl CommitmentParams {
    ///Derive `g` and `h` over `p = 2^255 - 19` and check that they are usable:
    ///`g != h`, and neither is `1` or `p - 1`.
    pub fn derive() -> Result<Self, ParamsError> {
        let field = *FIELD;
        let p = field.value();
        let order = non_zero(p.wrapping_sub(&U256::ONE))?;
        let base_range = non_zero(p.wrapping_sub(&U256::from_u64(3)))?;

        let g = map_to_base(G_TAG, &base_range);
        let h = map_to_base(H_TAG, &base_range);

        let degenerate = |x: &U256| *x == U256::ONE || *x == p.wrapping_sub(&U256::ONE);
        if degenerate(&g) {
            return Err(ParamsError::DegenerateGenerator(G_TAG));
        }
        if degenerate(&h) {
            return Err(ParamsError::DegenerateGenerator(H_TAG));
        }
        if g == h {
            return Err(ParamsError::DuplicateGenerators);
        }

        debug!(g = %to_hex(&g), h = %to_hex(&h), "derived commitment generators");
        return Ok(Self{field, g, h, order});
    }

    ///`p - 1`, the modulus for exponents.
    pub fn order(&self) -> &NonZero<U256> {
        return &self.order;
    }

    ///Hash the canonical text of `value` into an exponent in `[0, p-1)`.
    pub fn value_to_exponent(&self, value: &Amount) -> U256 {
        let exponent = domain_h_int(value.to_string().as_bytes(), domains::VALUE);
        return reduce(&exponent, &self.order);
    }

    ///`g^value_to_exponent(value) * h^(blinding mod (p-1)) mod p`
    pub fn commit(&self, value: &Amount, blinding: &U256) -> Commitment {
        let value_term = mod_exp(&self.g, &self.value_to_exponent(value), &self.field);
        let blinding_term = mod_exp(&self.h, &reduce(blinding, &self.order), &self.field);
        return Commitment(mod_mul(&value_term, &blinding_term, &self.field));
    }

    ///Uniformly random blinding factor in `[0, p-1)`.
    pub fn random_blinding(&self) -> U256 {
        return random_below(&self.order);
    }
}

///See `CommitmentParams::value_to_exponent`.
pub fn value_to_exponent(value: &Amount) -> U256 {
    return PARAMS.value_to_exponent(value);
}

///See `CommitmentParams::commit`.
pub fn create_commitment(value: &Amount, blinding: &U256) -> Commitment {
    return PARAMS.commit(value, blinding);
}

///Uniformly random blinding factor in `[0, p-1)`, drawn from a CSPRNG.
pub fn random_blinding() -> U256 {
    return PARAMS.random_blinding();
}
