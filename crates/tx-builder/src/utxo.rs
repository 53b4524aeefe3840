use bitcoin::{Address, Amount, OutPoint, ScriptBuf, TxOut};

use crate::error::SourceResult;

/// An unspent output owned by the funding address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Utxo {
    /// Output being spent.
    pub outpoint: OutPoint,
    /// Value of the output.
    pub value: Amount,
    /// Locking script of the output.
    pub script_pubkey: ScriptBuf,
    /// Whether the creating transaction is confirmed.
    pub confirmed: bool,
}

impl Utxo {
    /// Constructs a new instance.
    pub fn new(outpoint: OutPoint, value: Amount, script_pubkey: ScriptBuf, confirmed: bool) -> Self {
        Self {
            outpoint,
            value,
            script_pubkey,
            confirmed,
        }
    }

    /// The output as it appears in the creating transaction.
    pub fn txout(&self) -> TxOut {
        TxOut {
            value: self.value,
            script_pubkey: self.script_pubkey.clone(),
        }
    }

    /// Lowercase hex of the locking script.
    pub fn script_pubkey_hex(&self) -> String {
        self.script_pubkey.to_hex_string()
    }
}

/// Source of the UTXO set for an address.
///
/// Implementations may block. They are expected to enforce their own timeout
/// and must not retry internally.
pub trait UtxoSource {
    /// Fetches the current unspent outputs of `address`.
    fn fetch_utxos(&self, address: &Address) -> SourceResult<Vec<Utxo>>;
}

impl<T: UtxoSource + ?Sized> UtxoSource for &T {
    fn fetch_utxos(&self, address: &Address) -> SourceResult<Vec<Utxo>> {
        (**self).fetch_utxos(address)
    }
}
