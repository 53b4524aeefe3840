//! BRC-20 operation payloads.
//!
//! BRC-20 tokens are defined by inscriptions whose body is a small JSON
//! object with content type `application/json`. This crate validates the
//! fields of the three operations and renders them in the exact form
//! indexers expect.
//!
//! ```
//! use ordkit_brc20_fmt::build_mint;
//!
//! let content = build_mint("ordi", 1000).unwrap();
//! assert_eq!(
//!     content.body(),
//!     br#"{"p":"brc-20","op":"mint","tick":"ordi","amt":"1000"}"#
//! );
//! ```

mod amount;
#[cfg(feature = "arbitrary")]
mod arbitrary;
mod error;
pub mod operation;
mod payload;
mod serde;
mod ticker;

pub use amount::{InvalidAmount, TokenAmount};
pub use error::{Brc20Error, Brc20Result};
pub use operation::Brc20Operation;
pub use payload::{BRC20_CONTENT_TYPE, build_deploy, build_mint, build_transfer};
pub use ticker::{InvalidTicker, MAX_TICKER_LEN, MIN_TICKER_LEN, Ticker};
