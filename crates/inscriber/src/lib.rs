//! Inscription request pipeline.
//!
//! An [`InscriptionRequest`] is validated, its content encoded into an
//! envelope, funding selected from the funding address and the result
//! assembled into an unsigned transaction for an external signer:
//!
//! ```no_run
//! use ordkit_inscriber::{InscriberConfig, Inscriber, InscriptionRequest};
//!
//! let inscriber = Inscriber::from_config(InscriberConfig::default())?;
//! let req = InscriptionRequest::from_json(r#"{
//!     "content": "68656c6c6f20776f726c64",
//!     "contentType": "text/plain",
//!     "feeRatePerVByte": 5,
//!     "fundingAddress": "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx",
//!     "receiveAddress": "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx",
//!     "network": "testnet"
//! }"#)?;
//! let prepared = inscriber.prepare(&req)?;
//! println!("{}", prepared.psbt_base64()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod errors;
mod pipeline;
mod request;

pub use config::{ConfigError, InscriberConfig};
pub use errors::{InscribeError, InscribeResult, ValidationError};
pub use pipeline::{Inscriber, PreparedInscription};
pub use request::{InscriptionRequest, ValidatedRequest};
