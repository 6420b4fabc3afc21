//! Validation errors for the fundamental types.

use thiserror::Error;

/// Why a participant-supplied address string was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,

    #[error("address {0} does not start with kyc_")]
    InvalidPrefix(String),

    #[error("address has length {got}, expected {expected}")]
    InvalidLength { expected: usize, got: usize },

    #[error("address contains a character outside the base32 alphabet")]
    InvalidCharacter,

    #[error("address is not in canonical form")]
    NonCanonical,

    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// Why a coin amount was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoinsError {
    #[error("invalid denomination: {0:?}")]
    InvalidDenom(String),

    #[error("duplicate denomination: {0}")]
    DuplicateDenom(String),

    #[error("negative amount {amount} for denomination {denom}")]
    NegativeAmount { denom: String, amount: i128 },

    #[error("amount must contain at least one positive quantity")]
    Empty,

    #[error("amount overflow for denomination {0}")]
    Overflow(String),
}

/// Unknown membership tier name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown membership type: {0}")]
pub struct UnknownMembershipType(pub String);
