use arbitrary::{Arbitrary, Unstructured};

use crate::operation::{Brc20Operation, MAX_DECIMALS};
use crate::ticker::{MAX_TICKER_LEN, MIN_TICKER_LEN};
use crate::{Ticker, TokenAmount};

impl<'a> Arbitrary<'a> for Ticker {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(MIN_TICKER_LEN..=MAX_TICKER_LEN)?;
        // Map each random byte into a printable ASCII character ('!'..='~').
        let s: String = (0..len)
            .map(|_| u8::arbitrary(u).map(|b| char::from(b'!' + b % 94)))
            .collect::<arbitrary::Result<_>>()?;
        s.parse().map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

impl<'a> Arbitrary<'a> for TokenAmount {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = u.int_in_range(1..=u128::MAX)?;
        TokenAmount::new(value).map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

impl<'a> Arbitrary<'a> for Brc20Operation {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let tick = Ticker::arbitrary(u)?;
        let op = match u.int_in_range(0..=2)? {
            0 => {
                let max = TokenAmount::arbitrary(u)?;
                let limit = match bool::arbitrary(u)? {
                    true => Some(u.int_in_range(1..=max.get())?),
                    false => None,
                };
                let decimals = match bool::arbitrary(u)? {
                    true => Some(u.int_in_range(0..=MAX_DECIMALS)?),
                    false => None,
                };
                Self::deploy(tick.as_str(), max.get(), limit, decimals)
            }
            1 => Self::mint(tick.as_str(), TokenAmount::arbitrary(u)?.get()),
            _ => Self::transfer(tick.as_str(), TokenAmount::arbitrary(u)?.get()),
        };
        op.map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}
