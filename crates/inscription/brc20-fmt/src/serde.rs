use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Serialize};

use crate::ticker::{MAX_TICKER_LEN, MIN_TICKER_LEN};
use crate::{Ticker, TokenAmount};

impl Serialize for Ticker {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Ticker {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct StrVisitor;

        impl de::Visitor<'_> for StrVisitor {
            type Value = Ticker;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "a {MIN_TICKER_LEN} to {MAX_TICKER_LEN} character ASCII string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Ticker, E> {
                Ticker::from_str(v).map_err(E::custom)
            }
        }

        d.deserialize_str(StrVisitor)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct StrVisitor;

        impl de::Visitor<'_> for StrVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "a positive integer as a decimal string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TokenAmount, E> {
                TokenAmount::from_str(v).map_err(E::custom)
            }
        }

        d.deserialize_str(StrVisitor)
    }
}
