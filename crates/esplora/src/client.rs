//! Esplora REST client used as the UTXO source.

use std::time::Duration;

use bitcoin::{Address, Amount, OutPoint, Script, Txid};
use ordkit_tx_builder::{SourceResult, Utxo, UtxoSource};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::*;

use crate::error::{HttpError, HttpResult};
use crate::http::{build_client, parse_json, read_json, trim_base};
use crate::network::NetworkKind;

/// Entry of `GET /address/{addr}/utxo`.
#[derive(Debug, Deserialize)]
struct EsploraUtxo {
    txid: Txid,
    vout: u32,
    value: u64,
    status: EsploraTxStatus,
}

#[derive(Debug, Deserialize)]
struct EsploraTxStatus {
    confirmed: bool,
}

/// Blocking client for an Esplora-compatible explorer.
#[derive(Debug, Clone)]
pub struct EsploraClient {
    base: String,
    client: Client,
}

impl EsploraClient {
    /// Constructs a client against `base`, e.g. `https://blockstream.info/api`.
    pub fn new(base: &str, timeout: Duration) -> HttpResult<Self> {
        Ok(Self {
            base: trim_base(base),
            client: build_client(timeout)?,
        })
    }

    /// Constructs a client against the public explorer for `network`.
    pub fn for_network(network: NetworkKind, timeout: Duration) -> HttpResult<Self> {
        Self::new(network.explorer_base(), timeout)
    }

    /// API base URL, without a trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn utxo_url(&self, address: &Address) -> String {
        format!("{}/address/{}/utxo", self.base, address)
    }

    /// Fetches the UTXOs of `address`.
    pub fn get_utxos(&self, address: &Address) -> HttpResult<Vec<Utxo>> {
        let url = self.utxo_url(address);
        debug!(%url, "fetching utxos");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(HttpError::from_reqwest)?;
        let entries: Vec<EsploraUtxo> = read_json(resp)?;
        Ok(into_utxos(entries, &address.script_pubkey()))
    }
}

impl UtxoSource for EsploraClient {
    fn fetch_utxos(&self, address: &Address) -> SourceResult<Vec<Utxo>> {
        self.get_utxos(address).map_err(|e| {
            warn!(%address, %e, "utxo fetch failed");
            e.into()
        })
    }
}

/// Parses an Esplora UTXO listing. The listing has no scripts, so every
/// entry is given `script_pubkey`, the locking script of the queried address.
pub fn parse_utxo_listing(body: &str, script_pubkey: &Script) -> HttpResult<Vec<Utxo>> {
    let entries: Vec<EsploraUtxo> = parse_json(body)?;
    Ok(into_utxos(entries, script_pubkey))
}

fn into_utxos(entries: Vec<EsploraUtxo>, script_pubkey: &Script) -> Vec<Utxo> {
    entries
        .into_iter()
        .map(|e| {
            Utxo::new(
                OutPoint::new(e.txid, e.vout),
                Amount::from_sat(e.value),
                script_pubkey.to_owned(),
                e.status.confirmed,
            )
        })
        .collect()
}
