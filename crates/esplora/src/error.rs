use ordkit_tx_builder::SourceError;
use thiserror::Error;

/// Errors talking to an HTTP collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The HTTP client could not be constructed.
    #[error("http client: {0}")]
    Client(String),

    /// The request failed before a response was received.
    #[error("network: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body was not what was expected.
    #[error("unexpected response: {0}")]
    Protocol(String),
}

impl HttpError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Protocol(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<HttpError> for SourceError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout => SourceError::Timeout,
            HttpError::Protocol(reason) => SourceError::Protocol(reason),
            other => SourceError::Network(other.to_string()),
        }
    }
}

/// Result of HTTP collaborator calls.
pub type HttpResult<T> = Result<T, HttpError>;
