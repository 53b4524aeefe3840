use bitcoin::Amount;
use ordkit_brc20_fmt::Brc20Error;
use ordkit_envelope_fmt::EnvelopeBuildError;
use ordkit_esplora::HttpError;
use ordkit_tx_builder::{BuildError, SelectError, SourceError};
use thiserror::Error;

use crate::config::ConfigError;

/// Request fields that failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Fee rate not finite and positive.
    #[error("fee rate must be a positive number of sat/vB, got {0}")]
    InvalidFeeRate(f64),

    /// An address failed to parse.
    #[error("invalid {field}: {reason}")]
    InvalidAddress {
        /// Request field holding the address.
        field: &'static str,
        /// Parser message.
        reason: String,
    },

    /// An address belongs to another network.
    #[error("{field} is not a {network} address")]
    WrongNetwork {
        /// Request field holding the address.
        field: &'static str,
        /// Network the request targets.
        network: String,
    },

    /// The request targets a different network than the inscriber.
    #[error("request is for {requested} but inscriber runs on {configured}")]
    NetworkMismatch {
        /// Network named in the request.
        requested: String,
        /// Network of the inscriber.
        configured: String,
    },

    /// The content type is unusable.
    #[error("invalid content type: {0}")]
    InvalidContentType(String),

    /// The BRC-20 operation is malformed.
    #[error("brc-20: {0}")]
    Brc20(String),

    /// The request JSON is malformed.
    #[error("malformed request: {0}")]
    Malformed(String),
}

/// Errors surfaced by the inscription pipeline.
#[derive(Debug, Error)]
pub enum InscribeError {
    /// The request was rejected before any collaborator was contacted.
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    /// The funding address cannot cover the inscription.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Value plus fee required.
        needed: Amount,
        /// Value available.
        available: Amount,
    },

    /// The content, or the envelope carrying it, exceeds its maximum.
    #[error("content is {len} bytes, max is {max}")]
    ContentTooLarge {
        /// Length of the body or envelope.
        len: usize,
        /// Limit that was exceeded.
        max: usize,
    },

    /// The inscriber config is unusable.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// A collaborator could not be reached or failed.
    #[error("network: {0}")]
    Network(String),

    /// A collaborator answered with something unusable, or an internal
    /// invariant of the built transaction did not hold.
    #[error("protocol: {0}")]
    Protocol(String),
}

impl From<EnvelopeBuildError> for InscribeError {
    fn from(err: EnvelopeBuildError) -> Self {
        match err {
            EnvelopeBuildError::ContentTooLarge { len, max }
            | EnvelopeBuildError::EnvelopeTooLarge { len, max } => {
                Self::ContentTooLarge { len, max }
            }
            other => ValidationError::InvalidContentType(other.to_string()).into(),
        }
    }
}

impl From<Brc20Error> for InscribeError {
    fn from(err: Brc20Error) -> Self {
        match err {
            Brc20Error::Content(inner) => inner.into(),
            other => ValidationError::Brc20(other.to_string()).into(),
        }
    }
}

impl From<SourceError> for InscribeError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Protocol(reason) => Self::Protocol(reason),
            other => Self::Network(other.to_string()),
        }
    }
}

impl From<SelectError> for InscribeError {
    fn from(err: SelectError) -> Self {
        match err {
            SelectError::Source(inner) => inner.into(),
            SelectError::InsufficientFunds { needed, available } => {
                Self::InsufficientFunds { needed, available }
            }
        }
    }
}

impl From<BuildError> for InscribeError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::InsufficientFunds { needed, available } => {
                Self::InsufficientFunds { needed, available }
            }
            BuildError::EnvelopeTooLarge { len, max } => Self::ContentTooLarge { len, max },
            other => Self::Protocol(other.to_string()),
        }
    }
}

impl From<HttpError> for InscribeError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Protocol(reason) => Self::Protocol(reason),
            other => Self::Network(other.to_string()),
        }
    }
}

/// Result of pipeline operations.
pub type InscribeResult<T> = Result<T, InscribeError>;
