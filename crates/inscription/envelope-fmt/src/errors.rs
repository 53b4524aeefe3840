use bitcoin::script::PushBytesError;
use thiserror::Error;

/// Errors that can occur while parsing inscription envelopes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeParseError {
    /// No `OP_FALSE OP_IF` sequence found in the script.
    #[error("no envelope found in script")]
    NoEnvelope,

    /// The envelope does not start with the `ord` protocol identifier.
    #[error("missing ord protocol identifier")]
    MissingProtocolId,

    /// The envelope carries no content type field.
    #[error("missing content type field")]
    MissingContentType,

    /// A field tag appeared more than once.
    #[error("duplicate field with tag {0:#04x}")]
    DuplicateField(u8),

    /// A field tag was not followed by its value.
    #[error("field with tag {0:#04x} has no value")]
    MissingFieldValue(u8),

    /// Script ended before the closing `OP_ENDIF`.
    #[error("envelope is not terminated by OP_ENDIF")]
    UnterminatedEnvelope,

    /// The envelope contains an opcode or malformed push where data was expected.
    #[error("invalid instruction inside envelope")]
    InvalidInstruction,

    /// The content type is empty or not valid UTF-8.
    #[error("invalid content type")]
    InvalidContentType,
}

/// Errors that can occur while building inscription envelopes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeBuildError {
    /// Content body is longer than the configured maximum.
    #[error("content is {len} bytes, exceeding the {max} byte limit")]
    ContentTooLarge {
        /// Length of the rejected body.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The encoded envelope is too long to be revealed as a witness script.
    #[error("envelope is {len} bytes, exceeding the {max} byte witness script limit")]
    EnvelopeTooLarge {
        /// Length of the encoded envelope.
        len: usize,
        /// Witness script limit.
        max: usize,
    },

    /// Content type is empty.
    #[error("content type must not be empty")]
    InvalidContentType,

    /// Content type does not fit in a single script push.
    #[error("content type is {0} bytes, exceeding the script element limit")]
    ContentTypeTooLong(usize),

    /// Failed to convert a slice into `PushBytesBuf`.
    #[error("pushbytes: {0}")]
    PushBytes(#[from] PushBytesError),
}

/// Result of envelope parsing.
pub type EnvelopeParseResult<T> = Result<T, EnvelopeParseError>;

/// Result of envelope building.
pub type EnvelopeBuildResult<T> = Result<T, EnvelopeBuildError>;
