//! Client for the inscription order and broadcast service.

use std::time::Duration;

use bitcoin::consensus::encode::serialize_hex;
use bitcoin::{Address, Transaction, Txid};
use ordkit_envelope_fmt::InscriptionContent;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::error::{HttpError, HttpResult};
use crate::http::{build_client, read_json, trim_base};

/// One file of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFile {
    /// File name shown by the service.
    pub name: String,
    /// Size of the content in bytes.
    pub size: usize,
    /// MIME type of the content.
    #[serde(rename = "type")]
    pub content_type: String,
}

impl OrderFile {
    /// Describes `content` under `name`.
    pub fn for_content(name: impl Into<String>, content: &InscriptionContent) -> Self {
        Self {
            name: name.into(),
            size: content.len(),
            content_type: content.content_type().to_owned(),
        }
    }
}

/// An inscription order to be fulfilled by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderManifest {
    /// Files to inscribe.
    pub files: Vec<OrderFile>,
    /// Fee rate in sat/vB.
    pub fee: u64,
    /// Address that receives the inscriptions.
    pub receive_address: String,
}

impl OrderManifest {
    /// Order for a single piece of content.
    pub fn single(
        name: impl Into<String>,
        content: &InscriptionContent,
        fee_rate_sat_vb: u64,
        receive_address: &Address,
    ) -> Self {
        Self {
            files: vec![OrderFile::for_content(name, content)],
            fee: fee_rate_sat_vb,
            receive_address: receive_address.to_string(),
        }
    }
}

/// Service acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Identifier assigned by the service.
    pub order_id: String,
    /// Txid, once a transaction has been broadcast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<Txid>,
}

#[derive(Serialize)]
struct BroadcastRequest {
    tx: String,
}

/// Port to the order and broadcast service.
pub trait OrderService {
    /// Submits an order manifest.
    fn submit_manifest(&self, manifest: &OrderManifest) -> HttpResult<OrderReceipt>;

    /// Submits a fully signed transaction for broadcast.
    fn submit_signed_tx(&self, tx: &Transaction) -> HttpResult<OrderReceipt>;
}

impl<T: OrderService + ?Sized> OrderService for &T {
    fn submit_manifest(&self, manifest: &OrderManifest) -> HttpResult<OrderReceipt> {
        (**self).submit_manifest(manifest)
    }

    fn submit_signed_tx(&self, tx: &Transaction) -> HttpResult<OrderReceipt> {
        (**self).submit_signed_tx(tx)
    }
}

/// Blocking HTTP implementation of [`OrderService`].
#[derive(Debug, Clone)]
pub struct HttpOrderService {
    base: String,
    client: Client,
}

impl HttpOrderService {
    /// Constructs a client against `base`.
    pub fn new(base: &str, timeout: Duration) -> HttpResult<Self> {
        Ok(Self {
            base: trim_base(base),
            client: build_client(timeout)?,
        })
    }

    /// Service base URL, without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> HttpResult<OrderReceipt> {
        let url = format!("{}/{}", self.base, path);
        debug!(%url, "posting to order service");

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(HttpError::from_reqwest)?;
        let receipt: OrderReceipt = read_json(resp)?;
        info!(order_id = %receipt.order_id, txid = ?receipt.txid, "order service accepted");
        Ok(receipt)
    }
}

impl OrderService for HttpOrderService {
    fn submit_manifest(&self, manifest: &OrderManifest) -> HttpResult<OrderReceipt> {
        self.post("order", manifest)
    }

    fn submit_signed_tx(&self, tx: &Transaction) -> HttpResult<OrderReceipt> {
        if tx.input.iter().any(|i| i.witness.is_empty() && i.script_sig.is_empty()) {
            return Err(HttpError::Protocol("transaction has unsigned inputs".to_owned()));
        }
        self.post(
            "broadcast",
            &BroadcastRequest {
                tx: serialize_hex(tx),
            },
        )
    }
}
