use bitcoin::Amount;
use bitcoin::psbt;
use thiserror::Error;

/// Errors reported by a [`UtxoSource`](crate::UtxoSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request could not be completed.
    #[error("network: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The response could not be understood.
    #[error("protocol: {0}")]
    Protocol(String),
}

/// Errors from UTXO selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Fetching the UTXO set failed.
    #[error("utxo source: {0}")]
    Source(#[from] SourceError),

    /// The UTXO set cannot cover the required value plus fee.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Required value plus fee at the point selection gave up.
        needed: Amount,
        /// Total value of the eligible UTXOs.
        available: Amount,
    },
}

/// Errors from assembling the unsigned transaction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No inputs were supplied.
    #[error("no inputs supplied")]
    EmptyInputs,

    /// Inputs do not cover the inscription output plus fee.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Inscription postage plus fee.
        needed: Amount,
        /// Sum of the inputs.
        available: Amount,
    },

    /// The envelope is too long to ever be revealed from the commitment.
    #[error("envelope is {len} bytes, exceeding the {max} byte witness script limit")]
    EnvelopeTooLarge {
        /// Length of the envelope.
        len: usize,
        /// Witness script limit.
        max: usize,
    },

    /// A change output is required but no change address was given.
    #[error("change of {0} needs a change address")]
    NoChangeAddress(Amount),

    /// Summing values overflowed.
    #[error("amount overflow")]
    AmountOverflow,

    /// PSBT export failed.
    #[error("psbt: {0}")]
    Psbt(#[from] psbt::Error),
}

/// Result of a UTXO fetch.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result of UTXO selection.
pub type SelectResult<T> = Result<T, SelectError>;

/// Result of transaction assembly.
pub type BuildResult<T> = Result<T, BuildError>;
