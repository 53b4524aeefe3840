//! The inscription request and its validated form.

use std::str::FromStr;

use bitcoin::{Address, FeeRate};
use ordkit_brc20_fmt::{Brc20Operation, Brc20Result};
use ordkit_envelope_fmt::InscriptionContent;
use ordkit_esplora::NetworkKind;
use ordkit_tx_builder::fee_rate_from_sat_per_vb;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// A request to inscribe one piece of content.
///
/// This is the loosely typed boundary form, as received over JSON with the
/// content hex encoded:
///
/// ```json
/// {
///   "content": "68656c6c6f20776f726c64",
///   "contentType": "text/plain",
///   "feeRatePerVByte": 5,
///   "fundingAddress": "tb1q...",
///   "receiveAddress": "tb1q...",
///   "network": "testnet"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InscriptionRequest {
    /// Content body.
    #[serde(with = "hex::serde")]
    pub content: Vec<u8>,

    /// MIME type of the content.
    pub content_type: String,

    /// Fee rate in sat/vB.
    #[serde(rename = "feeRatePerVByte")]
    pub fee_rate_per_vbyte: f64,

    /// Address whose UTXOs fund the transaction and which receives change.
    pub funding_address: String,

    /// Address the inscription is delivered to.
    pub receive_address: String,

    /// Target network.
    #[serde(default)]
    pub network: NetworkKind,
}

impl InscriptionRequest {
    /// Parses a JSON request.
    pub fn from_json(s: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(s).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Builds a request inscribing a BRC-20 operation.
    pub fn from_brc20(
        op: &Brc20Operation,
        fee_rate_per_vbyte: f64,
        funding_address: impl Into<String>,
        receive_address: impl Into<String>,
        network: NetworkKind,
    ) -> Brc20Result<Self> {
        let (content_type, content) = op.to_content()?.into_parts();
        Ok(Self {
            content,
            content_type,
            fee_rate_per_vbyte,
            funding_address: funding_address.into(),
            receive_address: receive_address.into(),
            network,
        })
    }

    /// Checks every field. Content length is checked later, by the encoder.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let fee_rate = fee_rate_from_sat_per_vb(self.fee_rate_per_vbyte)
            .ok_or(ValidationError::InvalidFeeRate(self.fee_rate_per_vbyte))?;
        let funding_address = parse_address("fundingAddress", &self.funding_address, self.network)?;
        let receive_address = parse_address("receiveAddress", &self.receive_address, self.network)?;
        let content = InscriptionContent::new(self.content_type.as_str(), self.content.as_slice())
            .map_err(|e| ValidationError::InvalidContentType(e.to_string()))?;

        Ok(ValidatedRequest {
            content,
            fee_rate,
            fee_rate_per_vbyte: self.fee_rate_per_vbyte,
            funding_address,
            receive_address,
            network: self.network,
        })
    }
}

/// An [`InscriptionRequest`] with every field checked and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Content to inscribe.
    pub content: InscriptionContent,
    /// Fee rate, rounded up to whole sat/kwu.
    pub fee_rate: FeeRate,
    /// Fee rate as requested, in sat/vB.
    pub fee_rate_per_vbyte: f64,
    /// Funding and change address.
    pub funding_address: Address,
    /// Delivery address.
    pub receive_address: Address,
    /// Target network.
    pub network: NetworkKind,
}

fn parse_address(
    field: &'static str,
    s: &str,
    network: NetworkKind,
) -> Result<Address, ValidationError> {
    Address::from_str(s)
        .map_err(|e| ValidationError::InvalidAddress {
            field,
            reason: e.to_string(),
        })?
        .require_network(network.to_bitcoin())
        .map_err(|_| ValidationError::WrongNetwork {
            field,
            network: network.to_string(),
        })
}
