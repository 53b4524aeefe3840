//! BRC-20 operations and their JSON wire form.
//!
//! The wire form is minified JSON with the keys in protocol order:
//!
//! ```text
//! {"p":"brc-20","op":"deploy","tick":"ordi","max":"21000000","lim":"1000","dec":"8"}
//! {"p":"brc-20","op":"mint","tick":"ordi","amt":"1000"}
//! {"p":"brc-20","op":"transfer","tick":"ordi","amt":"100"}
//! ```
//!
//! All numeric fields are decimal strings.

use serde::{Deserialize, Serialize};

use crate::error::{Brc20Error, Brc20Result};
use crate::{InvalidAmount, Ticker, TokenAmount};

/// Protocol literal carried in the `p` field.
pub const PROTOCOL_LITERAL: &str = "brc-20";

/// Decimals assumed by indexers when `dec` is absent.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Largest accepted `dec` value.
pub const MAX_DECIMALS: u8 = 18;

/// A BRC-20 operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Brc20Operation {
    /// Registers a new ticker.
    Deploy {
        /// Ticker being deployed.
        tick: Ticker,
        /// Maximum supply.
        max: TokenAmount,
        /// Per-mint limit, if any.
        limit: Option<TokenAmount>,
        /// Decimal precision. Left out of the JSON when it is
        /// [`DEFAULT_DECIMALS`].
        decimals: u8,
    },

    /// Mints tokens of a deployed ticker.
    Mint {
        /// Ticker being minted.
        tick: Ticker,
        /// Amount to mint.
        amount: TokenAmount,
    },

    /// Inscribes a transferable balance.
    Transfer {
        /// Ticker being transferred.
        tick: Ticker,
        /// Amount to transfer.
        amount: TokenAmount,
    },
}

impl Brc20Operation {
    /// Constructs a deploy operation, validating every field. Absent
    /// `decimals` means [`DEFAULT_DECIMALS`].
    pub fn deploy(
        tick: &str,
        max: u128,
        limit: Option<u128>,
        decimals: Option<u8>,
    ) -> Brc20Result<Self> {
        let tick: Ticker = tick.parse()?;
        let max = amount_field("max", max)?;
        let limit = limit.map(|lim| amount_field("lim", lim)).transpose()?;

        if let Some(lim) = limit {
            if lim > max {
                return Err(Brc20Error::LimitExceedsMax {
                    limit: lim.get(),
                    max: max.get(),
                });
            }
        }
        let decimals = decimals.unwrap_or(DEFAULT_DECIMALS);
        if decimals > MAX_DECIMALS {
            return Err(Brc20Error::InvalidDecimals(decimals));
        }

        Ok(Self::Deploy {
            tick,
            max,
            limit,
            decimals,
        })
    }

    /// Constructs a mint operation.
    pub fn mint(tick: &str, amount: u128) -> Brc20Result<Self> {
        Ok(Self::Mint {
            tick: tick.parse()?,
            amount: amount_field("amt", amount)?,
        })
    }

    /// Constructs a transfer operation.
    pub fn transfer(tick: &str, amount: u128) -> Brc20Result<Self> {
        Ok(Self::Transfer {
            tick: tick.parse()?,
            amount: amount_field("amt", amount)?,
        })
    }

    /// Gets the `op` field value.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Deploy { .. } => "deploy",
            Self::Mint { .. } => "mint",
            Self::Transfer { .. } => "transfer",
        }
    }

    /// Gets the ticker.
    pub fn tick(&self) -> &Ticker {
        match self {
            Self::Deploy { tick, .. } | Self::Mint { tick, .. } | Self::Transfer { tick, .. } => {
                tick
            }
        }
    }

    /// Serializes to minified JSON.
    pub fn to_json(&self) -> Brc20Result<Vec<u8>> {
        let mut payload = Payload {
            p: PROTOCOL_LITERAL,
            op: self.op(),
            tick: self.tick(),
            max: None,
            lim: None,
            amt: None,
            dec: None,
        };

        match self {
            Self::Deploy {
                max,
                limit,
                decimals,
                ..
            } => {
                payload.max = Some(*max);
                payload.lim = *limit;
                payload.dec = (*decimals != DEFAULT_DECIMALS).then(|| decimals.to_string());
            }
            Self::Mint { amount, .. } | Self::Transfer { amount, .. } => {
                payload.amt = Some(*amount);
            }
        }

        Ok(serde_json::to_vec(&payload)?)
    }

    /// Parses a JSON payload, applying the same validation as the constructors.
    pub fn from_json(bytes: &[u8]) -> Brc20Result<Self> {
        let raw: RawPayload = serde_json::from_slice(bytes)?;
        if raw.p != PROTOCOL_LITERAL {
            return Err(Brc20Error::NotBrc20);
        }

        let tick: Ticker = raw.tick.parse()?;
        match raw.op.as_str() {
            "deploy" => {
                let max = parse_amount_field("max", raw.max.as_deref())?;
                let limit = raw
                    .lim
                    .as_deref()
                    .map(|lim| parse_amount_field("lim", Some(lim)))
                    .transpose()?;
                let decimals = raw.dec.as_deref().map(parse_decimals).transpose()?;
                Self::deploy(
                    tick.as_str(),
                    max.get(),
                    limit.map(TokenAmount::get),
                    decimals,
                )
            }
            "mint" => Ok(Self::Mint {
                tick,
                amount: parse_amount_field("amt", raw.amt.as_deref())?,
            }),
            "transfer" => Ok(Self::Transfer {
                tick,
                amount: parse_amount_field("amt", raw.amt.as_deref())?,
            }),
            _ => Err(Brc20Error::NotBrc20),
        }
    }
}

#[derive(Serialize)]
struct Payload<'a> {
    p: &'static str,
    op: &'static str,
    tick: &'a Ticker,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<TokenAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lim: Option<TokenAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amt: Option<TokenAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dec: Option<String>,
}

/// Loosely typed form, so validation failures map to typed errors instead
/// of opaque JSON errors.
#[derive(Deserialize)]
struct RawPayload {
    p: String,
    op: String,
    tick: String,
    max: Option<String>,
    lim: Option<String>,
    amt: Option<String>,
    dec: Option<String>,
}

fn amount_field(field: &'static str, value: u128) -> Brc20Result<TokenAmount> {
    TokenAmount::new(value).map_err(|reason| Brc20Error::InvalidAmount { field, reason })
}

fn parse_amount_field(field: &'static str, value: Option<&str>) -> Brc20Result<TokenAmount> {
    value
        .ok_or(InvalidAmount::Empty)
        .and_then(str::parse::<TokenAmount>)
        .map_err(|reason| Brc20Error::InvalidAmount { field, reason })
}

fn parse_decimals(value: &str) -> Brc20Result<u8> {
    let field = "dec";
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Brc20Error::InvalidAmount {
            field,
            reason: InvalidAmount::NotInteger,
        });
    }
    value.parse().map_err(|_| Brc20Error::InvalidAmount {
        field,
        reason: InvalidAmount::Overflow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_json() {
        let op = Brc20Operation::mint("ordi", 1000).unwrap();
        assert_eq!(
            op.to_json().unwrap(),
            br#"{"p":"brc-20","op":"mint","tick":"ordi","amt":"1000"}"#
        );
    }

    #[test]
    fn test_transfer_json() {
        let op = Brc20Operation::transfer("Sats", 5).unwrap();
        assert_eq!(
            op.to_json().unwrap(),
            br#"{"p":"brc-20","op":"transfer","tick":"Sats","amt":"5"}"#
        );
    }

    #[test]
    fn test_deploy_json() {
        let op = Brc20Operation::deploy("ordi", 21_000_000, Some(1000), None).unwrap();
        assert_eq!(
            op.to_json().unwrap(),
            br#"{"p":"brc-20","op":"deploy","tick":"ordi","max":"21000000","lim":"1000"}"#
        );

        let op = Brc20Operation::deploy("ordi", 21_000_000, None, Some(8)).unwrap();
        assert_eq!(
            op.to_json().unwrap(),
            br#"{"p":"brc-20","op":"deploy","tick":"ordi","max":"21000000","dec":"8"}"#
        );
    }

    #[test]
    fn test_deploy_default_decimals_omitted() {
        let op = Brc20Operation::deploy("ordi", 100, None, Some(DEFAULT_DECIMALS)).unwrap();
        assert_eq!(
            op.to_json().unwrap(),
            br#"{"p":"brc-20","op":"deploy","tick":"ordi","max":"100"}"#
        );
    }

    #[test]
    fn test_explicit_default_decimals_parse_back() {
        let explicit =
            Brc20Operation::deploy("ordi", 100, Some(10), Some(DEFAULT_DECIMALS)).unwrap();
        let implicit = Brc20Operation::deploy("ordi", 100, Some(10), None).unwrap();
        assert_eq!(explicit, implicit);
        assert_eq!(
            Brc20Operation::from_json(&explicit.to_json().unwrap()).unwrap(),
            explicit
        );

        let json = br#"{"p":"brc-20","op":"deploy","tick":"ordi","max":"100","dec":"18"}"#;
        assert_eq!(
            Brc20Operation::from_json(json).unwrap(),
            Brc20Operation::deploy("ordi", 100, None, None).unwrap()
        );

        let json = br#"{"p":"brc-20","op":"deploy","tick":"ordi","max":"100","dec":"0"}"#;
        assert!(matches!(
            Brc20Operation::from_json(json).unwrap(),
            Brc20Operation::Deploy { decimals: 0, .. }
        ));
    }

    #[test]
    fn test_large_amount_is_exact() {
        let max = 340_282_366_920_938_463_463_374_607_431_768_211_455u128;
        let op = Brc20Operation::deploy("ordi", max, None, None).unwrap();
        let json = String::from_utf8(op.to_json().unwrap()).unwrap();
        assert!(json.contains(r#""max":"340282366920938463463374607431768211455""#));
    }

    #[test]
    fn test_constructor_validation() {
        assert!(matches!(
            Brc20Operation::mint("abc", 1),
            Err(Brc20Error::InvalidTicker(_))
        ));
        assert!(Brc20Operation::mint("abcde", 1).is_ok());
        assert!(matches!(
            Brc20Operation::mint("abcdefg", 1),
            Err(Brc20Error::InvalidTicker(_))
        ));
        assert!(matches!(
            Brc20Operation::mint("ordi", 0),
            Err(Brc20Error::InvalidAmount {
                field: "amt",
                reason: InvalidAmount::Zero
            })
        ));
        assert!(matches!(
            Brc20Operation::deploy("ordi", 10, Some(11), None),
            Err(Brc20Error::LimitExceedsMax { limit: 11, max: 10 })
        ));
        assert!(matches!(
            Brc20Operation::deploy("ordi", 10, None, Some(19)),
            Err(Brc20Error::InvalidDecimals(19))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = br#"{
  "p": "brc-20",
  "op": "deploy",
  "tick": "ordi",
  "max": "21000000",
  "lim": "1000"
}"#;
        assert_eq!(
            Brc20Operation::from_json(json).unwrap(),
            Brc20Operation::deploy("ordi", 21_000_000, Some(1000), None).unwrap()
        );

        let json = br#"{"p":"brc-20","op":"mint","tick":"ordi","amt":"1000"}"#;
        assert_eq!(
            Brc20Operation::from_json(json).unwrap(),
            Brc20Operation::mint("ordi", 1000).unwrap()
        );
    }

    #[test]
    fn test_from_json_rejects() {
        let not_brc20 = br#"{"p":"brc-21","op":"mint","tick":"ordi","amt":"1"}"#;
        assert!(matches!(
            Brc20Operation::from_json(not_brc20),
            Err(Brc20Error::NotBrc20)
        ));

        let unknown_op = br#"{"p":"brc-20","op":"burn","tick":"ordi","amt":"1"}"#;
        assert!(matches!(
            Brc20Operation::from_json(unknown_op),
            Err(Brc20Error::NotBrc20)
        ));

        let missing_amt = br#"{"p":"brc-20","op":"mint","tick":"ordi"}"#;
        assert!(matches!(
            Brc20Operation::from_json(missing_amt),
            Err(Brc20Error::InvalidAmount {
                field: "amt",
                reason: InvalidAmount::Empty
            })
        ));

        let float_amt = br#"{"p":"brc-20","op":"mint","tick":"ordi","amt":"1.5"}"#;
        assert!(matches!(
            Brc20Operation::from_json(float_amt),
            Err(Brc20Error::InvalidAmount {
                field: "amt",
                reason: InvalidAmount::NotInteger
            })
        ));

        let bad_dec = br#"{"p":"brc-20","op":"deploy","tick":"ordi","max":"1","dec":"x"}"#;
        assert!(matches!(
            Brc20Operation::from_json(bad_dec),
            Err(Brc20Error::InvalidAmount { field: "dec", .. })
        ));

        assert!(matches!(
            Brc20Operation::from_json(b"not json"),
            Err(Brc20Error::Json(_))
        ));
    }
}
