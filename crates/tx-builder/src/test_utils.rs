//! Fixtures for exercising selection and building without a network.

use std::str::FromStr;

use bitcoin::hashes::Hash;
use bitcoin::{Address, Amount, Network, OutPoint, Txid};

use crate::error::{SourceError, SourceResult};
use crate::utxo::{Utxo, UtxoSource};

/// BIP-173 testnet P2WPKH vector, used as the default funding address.
pub const FUNDING_ADDRESS: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";

/// A [`UtxoSource`] serving a fixed UTXO set, or a fixed error.
#[derive(Debug, Clone, Default)]
pub struct FixtureUtxoSource {
    utxos: Vec<Utxo>,
    error: Option<SourceError>,
}

impl FixtureUtxoSource {
    /// Serves `utxos` for every address.
    pub fn new(utxos: Vec<Utxo>) -> Self {
        Self { utxos, error: None }
    }

    /// Fails every fetch with `error`.
    pub fn failing(error: SourceError) -> Self {
        Self {
            utxos: Vec::new(),
            error: Some(error),
        }
    }
}

impl UtxoSource for FixtureUtxoSource {
    fn fetch_utxos(&self, _address: &Address) -> SourceResult<Vec<Utxo>> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.utxos.clone()),
        }
    }
}

/// Parses [`FUNDING_ADDRESS`] for testnet.
pub fn funding_address() -> Address {
    Address::from_str(FUNDING_ADDRESS)
        .and_then(|addr| addr.require_network(Network::Testnet))
        .expect("test: valid fixture address")
}

/// Confirmed UTXO paying `sats` to [`funding_address`], with a txid derived
/// from `n` so fixtures sort deterministically.
pub fn fixture_utxo(n: u32, sats: u64) -> Utxo {
    let mut txid = [0; 32];
    txid[..4].copy_from_slice(&n.to_be_bytes());
    Utxo::new(
        OutPoint::new(Txid::from_byte_array(txid), 0),
        Amount::from_sat(sats),
        funding_address().script_pubkey(),
        true,
    )
}
