/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use sha3::{
    Digest,
    Sha3_256
};
use crate::field::U256;

///Number of leading digest bytes kept when hashing to an integer.
pub const HASH_INT_BYTES: usize = 16;

///Hash bytes to bytes, domain separated.
///
///The domain is a **prefix**: the digest is `SHA3-256(domain || msg)`.
pub fn domain_h_bytes(msg: &[u8], domain: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::default();
    hasher.update(domain);
    hasher.update(msg);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    return out;
}

///Hash bytes to bytes.
pub fn h_bytes(msg: &[u8]) -> [u8; 32] {
    return domain_h_bytes(msg, &[]);
}

///Hash bytes to an integer, domain separated.
///
///The first `HASH_INT_BYTES` bytes of the digest are read as a big-endian integer,
///so the result is always below 2<sup>128</sup>.
pub fn domain_h_int(msg: &[u8], domain: &[u8]) -> U256 {
    let digest = domain_h_bytes(msg, domain);
    let mut wide = [0u8; 32];
    wide[32 - HASH_INT_BYTES..].copy_from_slice(&digest[..HASH_INT_BYTES]);
    return U256::from_be_slice(&wide);
}

pub mod domains {
    //! Pre-defined hash domains

    pub const GENERATOR: &[u8] =    "XCTOK:gen:".as_bytes();
    pub const VALUE: &[u8] =        "VAL|".as_bytes();
}
