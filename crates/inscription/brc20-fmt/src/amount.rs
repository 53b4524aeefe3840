use std::fmt;
use std::num::NonZeroU128;
use std::str;

/// A positive integer token quantity.
///
/// Always rendered as a plain decimal string so no precision is lost to
/// floating point on either side of the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenAmount(NonZeroU128);

impl TokenAmount {
    /// Constructs a new amount, rejecting zero.
    pub fn new(value: u128) -> Result<Self, InvalidAmount> {
        NonZeroU128::new(value).map(Self).ok_or(InvalidAmount::Zero)
    }

    /// Gets the integer value.
    pub fn get(self) -> u128 {
        self.0.get()
    }
}

impl TryFrom<u128> for TokenAmount {
    type Error = InvalidAmount;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TokenAmount> for u128 {
    fn from(amount: TokenAmount) -> Self {
        amount.get()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl str::FromStr for TokenAmount {
    type Err = InvalidAmount;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidAmount::Empty);
        }
        // `u128::from_str` would also take a leading '+'.
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidAmount::NotInteger);
        }
        let value: u128 = s.parse().map_err(|_| InvalidAmount::Overflow)?;
        Self::new(value)
    }
}

/// Error type for invalid token amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidAmount {
    /// The amount string was empty.
    Empty,
    /// The amount is not a plain base-10 integer.
    NotInteger,
    /// The amount is zero.
    Zero,
    /// The amount does not fit in 128 bits.
    Overflow,
}

impl fmt::Display for InvalidAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "amount is empty"),
            Self::NotInteger => write!(f, "amount must be a base-10 integer"),
            Self::Zero => write!(f, "amount must be positive"),
            Self::Overflow => write!(f, "amount exceeds {}", u128::MAX),
        }
    }
}

impl std::error::Error for InvalidAmount {}
