use ordkit_envelope_fmt::EnvelopeBuildError;
use thiserror::Error;

use crate::{InvalidAmount, InvalidTicker};

/// Errors for building and parsing BRC-20 payloads.
#[derive(Debug, Error)]
pub enum Brc20Error {
    /// The ticker failed validation.
    #[error("invalid ticker: {0}")]
    InvalidTicker(#[from] InvalidTicker),

    /// A numeric field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidAmount {
        /// Wire name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: InvalidAmount,
    },

    /// Decimals above the protocol maximum.
    #[error("decimals {0} exceed the maximum of 18")]
    InvalidDecimals(u8),

    /// Per-mint limit larger than the max supply.
    #[error("mint limit {limit} exceeds max supply {max}")]
    LimitExceedsMax {
        /// Requested limit.
        limit: u128,
        /// Requested max supply.
        max: u128,
    },

    /// Payload is valid JSON but not a BRC-20 operation.
    #[error("not a brc-20 payload")]
    NotBrc20,

    /// Payload could not be (de)serialized.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload could not be wrapped as inscription content.
    #[error("content: {0}")]
    Content(#[from] EnvelopeBuildError),
}

/// Result of BRC-20 payload operations.
pub type Brc20Result<T> = Result<T, Brc20Error>;
