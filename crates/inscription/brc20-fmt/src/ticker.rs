use std::fmt;
use std::str;

/// Minimum ticker length in bytes.
pub const MIN_TICKER_LEN: usize = 4;

/// Maximum ticker length in bytes.
pub const MAX_TICKER_LEN: usize = 5;

/// BRC-20 ticker.
///
/// Holds [`MIN_TICKER_LEN`] to [`MAX_TICKER_LEN`] printable ASCII characters.
/// Case is significant to indexers, so it is preserved exactly as given and
/// never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker(String);

impl Ticker {
    /// Returns the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the ticker as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Converts to the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl str::FromStr for Ticker {
    type Err = InvalidTicker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(MIN_TICKER_LEN..=MAX_TICKER_LEN).contains(&s.len()) {
            return Err(InvalidTicker::InvalidLength(s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidTicker::NotAscii);
        }
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<&str> for Ticker {
    type Error = InvalidTicker;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Ticker {
    type Error = InvalidTicker;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.as_str().parse()
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// Error type for invalid tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTicker {
    /// The ticker is not between [`MIN_TICKER_LEN`] and [`MAX_TICKER_LEN`] bytes long.
    InvalidLength(usize),
    /// The ticker contains non-ASCII, whitespace or control characters.
    NotAscii,
}

impl fmt::Display for InvalidTicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(
                f,
                "ticker must be {MIN_TICKER_LEN} to {MAX_TICKER_LEN} characters, got {len}"
            ),
            Self::NotAscii => write!(f, "ticker must be printable ASCII"),
        }
    }
}

impl std::error::Error for InvalidTicker {}
