//! Funding and assembly of single-transaction inscriptions.
//!
//! The flow for one inscription is:
//!
//! 1. size a [`FeeEstimator`] for the envelope,
//! 2. pick funding inputs with a [`UtxoSelector`],
//! 3. assemble them with a [`TransactionBuilder`] into an
//!    [`UnsignedTransaction`], exported as a PSBT for an external signer.
//!
//! Nothing in this crate signs or broadcasts.

mod builder;
mod error;
mod fee;
mod select;
mod utxo;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use builder::{
    DUST_THRESHOLD, INSCRIPTION_OUTPUT_INDEX, INSCRIPTION_POSTAGE, TransactionBuilder,
    UnsignedTransaction, commitment_script,
};
pub use error::{
    BuildError, BuildResult, SelectError, SelectResult, SourceError, SourceResult,
};
pub use fee::{
    FeeEstimator, INPUT_VBYTES, OUTPUT_VBYTES, SEGWIT_MARKER_WEIGHT, TX_OVERHEAD_VBYTES,
    fee_rate_from_sat_per_vb,
};
pub use select::{
    DEFAULT_MAX_SELECTION_ROUNDS, FUNDING_OUTPUT_COUNT, Selection, UtxoSelector,
    select_largest_first,
};
pub use utxo::{Utxo, UtxoSource};
