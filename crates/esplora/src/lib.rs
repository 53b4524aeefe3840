//! Blocking HTTP clients for the two external collaborators: an Esplora
//! explorer serving the UTXO set, and the order service that accepts
//! manifests and signed transactions.

mod client;
mod error;
mod http;
mod network;
mod order;

#[cfg(test)]
mod test_server;

pub use client::{EsploraClient, parse_utxo_listing};
pub use error::{HttpError, HttpResult};
pub use http::DEFAULT_REQUEST_TIMEOUT;
pub use network::{MAINNET_EXPLORER_BASE, NetworkKind, TESTNET_EXPLORER_BASE, UnknownNetwork};
pub use order::{HttpOrderService, OrderFile, OrderManifest, OrderReceipt, OrderService};
