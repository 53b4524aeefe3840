//! Builders that produce inscription content for BRC-20 operations.

use ordkit_envelope_fmt::InscriptionContent;

use crate::error::Brc20Result;
use crate::operation::Brc20Operation;

/// MIME type under which BRC-20 payloads are inscribed.
pub const BRC20_CONTENT_TYPE: &str = "application/json";

impl Brc20Operation {
    /// Wraps the JSON payload as inscription content.
    pub fn to_content(&self) -> Brc20Result<InscriptionContent> {
        Ok(InscriptionContent::new(BRC20_CONTENT_TYPE, self.to_json()?)?)
    }
}

/// Builds a deploy inscription.
pub fn build_deploy(
    tick: &str,
    max: u128,
    limit: Option<u128>,
    decimals: Option<u8>,
) -> Brc20Result<InscriptionContent> {
    Brc20Operation::deploy(tick, max, limit, decimals)?.to_content()
}

/// Builds a mint inscription.
pub fn build_mint(tick: &str, amount: u128) -> Brc20Result<InscriptionContent> {
    Brc20Operation::mint(tick, amount)?.to_content()
}

/// Builds a transfer inscription.
pub fn build_transfer(tick: &str, amount: u128) -> Brc20Result<InscriptionContent> {
    Brc20Operation::transfer(tick, amount)?.to_content()
}
