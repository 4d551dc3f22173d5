/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

///Encoding/serialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    ///Failure to serialize.
    #[error("Encoding error.")]
    EncodingError,
    ///Failure to deserialize.
    #[error("Decoding error.")]
    DecodingError,
}

///Errors raised while deriving the commitment generators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    ///Montgomery arithmetic needs an odd modulus greater than 2.
    #[error("The modulus must be odd and greater than 2.")]
    InvalidModulus,
    ///A generator landed on `1` or `p - 1`.
    #[error("Generator `{0}` is degenerate.")]
    DegenerateGenerator(&'static str),
    ///`g == h`
    #[error("The value and blinding generators are equal.")]
    DuplicateGenerators,
}

///Errors raised while parsing a decimal amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Empty amount.")]
    Empty,
    #[error("Malformed amount: {0:?}")]
    Malformed(String),
    ///More fractional digits than `amount::DECIMALS`.
    #[error("Amount {0:?} has too many decimal places.")]
    TooManyDecimals(String),
    #[error("Amount is out of range.")]
    Overflow,
}

///Transition planner errors.
///
///These are raised before any commitment is computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    ///transfer-from without a known owner balance commitment.
    #[error("Owner must have an existing commitment.")]
    NoOwnerCommitment,
    ///transfer-from without a known allowance commitment.
    #[error("Spender must have an existing allowance commitment.")]
    NoAllowance,
    ///burn from an account without a known commitment.
    #[error("Account must have an existing commitment.")]
    NoAccountCommitment,

} impl PlanError {
    ///Every planner error means a required prior commitment is missing.
    pub fn kind(&self) -> ErrorKind {
        return ErrorKind::StateMissing
    }
}

///Coarse classification of a rejected ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ///The caller lacks the required role or approval.
    Authorization,
    ///The presented nonce is not exactly `stored + 1`.
    Replay,
    ///A required prior commitment or approval does not exist.
    StateMissing,
    ///A claimed commitment does not satisfy its multiplicative relation.
    AlgebraMismatch,
    ///The source and destination of a transfer are the same address.
    SelfTarget,
    ///The public supply counter would leave the representable range.
    Arithmetic,
}

///Ledger errors.
///
///Every variant rejects the whole operation: no record, nonce or supply value is altered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Only operator can mint (caller {caller}).")]
    NotOperator { caller: String },
    #[error("{caller} is not authorized to burn from {from}.")]
    NotAuthorizedToBurn { caller: String, from: String },
    #[error("No approval for spender {spender} on owner {owner}.")]
    NoApproval { owner: String, spender: String },

    #[error("Bad nonce for {address}: expected {expected}, got {provided}.")]
    BadNonce { address: String, expected: u64, provided: u64 },

    #[error("Owner {0} has no commitment.")]
    NoOwnerCommitment(String),
    #[error("No commitment to burn from {0}.")]
    NoBurnCommitment(String),

    #[error("Sender commitment mismatch.")]
    SenderCommitmentMismatch,
    #[error("Receiver commitment mismatch.")]
    ReceiverCommitmentMismatch,
    #[error("Owner commitment mismatch.")]
    OwnerCommitmentMismatch,
    #[error("Allowance commitment mismatch.")]
    AllowanceCommitmentMismatch,
    #[error("From commitment mismatch.")]
    FromCommitmentMismatch,

    #[error("Cannot transfer to self.")]
    SelfTransfer,
    #[error("Use confidential_transfer for self to self.")]
    SelfTransferFrom,

    #[error("Total supply out of range.")]
    SupplyOverflow,

    ///The backing store holds no token metadata.
    #[error("Ledger store is not initialized.")]
    Uninitialized,

} impl LedgerError {
    ///The taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        return match self {
            Self::NotOperator { .. }
            | Self::NotAuthorizedToBurn { .. }
            | Self::NoApproval { .. } => ErrorKind::Authorization,
            Self::BadNonce { .. } => ErrorKind::Replay,
            Self::NoOwnerCommitment(_)
            | Self::NoBurnCommitment(_)
            | Self::Uninitialized => ErrorKind::StateMissing,
            Self::SenderCommitmentMismatch
            | Self::ReceiverCommitmentMismatch
            | Self::OwnerCommitmentMismatch
            | Self::AllowanceCommitmentMismatch
            | Self::FromCommitmentMismatch => ErrorKind::AlgebraMismatch,
            Self::SelfTransfer
            | Self::SelfTransferFrom => ErrorKind::SelfTarget,
            Self::SupplyOverflow => ErrorKind::Arithmetic,
        }
    }
}
