//! The request pipeline: validate, encode, select, build.

use bitcoin::{Amount, Transaction};
use ordkit_brc20_fmt::Brc20Operation;
use ordkit_envelope_fmt::{EnvelopeEncoder, EnvelopeScript};
use ordkit_esplora::{EsploraClient, OrderManifest, OrderReceipt, OrderService};
use ordkit_tx_builder::{
    FeeEstimator, Selection, TransactionBuilder, UnsignedTransaction, UtxoSelector, UtxoSource,
};
use tracing::*;

use crate::config::InscriberConfig;
use crate::errors::{InscribeError, InscribeResult, ValidationError};
use crate::request::{InscriptionRequest, ValidatedRequest};

/// Turns [`InscriptionRequest`]s into unsigned transactions.
///
/// Holds no state between requests. Two requests prepared concurrently
/// against the same funding address may select the same UTXOs, which only
/// shows up when the second one is broadcast.
#[derive(Debug, Clone)]
pub struct Inscriber<S> {
    source: S,
    config: InscriberConfig,
}

impl Inscriber<EsploraClient> {
    /// Constructs an inscriber funding from the explorer named in `config`.
    pub fn from_config(config: InscriberConfig) -> InscribeResult<Self> {
        config.validate()?;
        let source = EsploraClient::new(config.explorer_base(), config.request_timeout())?;
        Self::new(source, config)
    }
}

impl<S: UtxoSource> Inscriber<S> {
    /// Constructs an inscriber over an arbitrary UTXO source, rejecting an
    /// invalid `config`.
    pub fn new(source: S, config: InscriberConfig) -> InscribeResult<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    /// Gets the config.
    pub fn config(&self) -> &InscriberConfig {
        &self.config
    }

    /// Prepares the unsigned transaction for `req`.
    ///
    /// Either every step succeeds or nothing is returned.
    pub fn prepare(&self, req: &InscriptionRequest) -> InscribeResult<PreparedInscription> {
        let span = info_span!("inscribe", network = %req.network, content_type = %req.content_type);
        let _g = span.enter();

        if req.network != self.config.network {
            return Err(ValidationError::NetworkMismatch {
                requested: req.network.to_string(),
                configured: self.config.network.to_string(),
            }
            .into());
        }
        let request = req.validate()?;

        let envelope = EnvelopeEncoder::new(self.config.max_content_len).encode(&request.content)?;
        debug!(envelope_len = envelope.len(), body_len = request.content.len(), "encoded envelope");

        let postage = Amount::from_sat(self.config.postage_sats);
        let selection = UtxoSelector::new(&self.source, FeeEstimator::for_envelope(&envelope))
            .with_confirmed_only(self.config.confirmed_only)
            .with_max_rounds(self.config.max_selection_rounds)
            .select(&request.funding_address, postage, request.fee_rate)
            .inspect_err(|e| warn!(%e, "funding selection failed"))?;

        let transaction = TransactionBuilder::new(request.network.to_bitcoin())
            .with_postage(postage)
            .with_dust_threshold(Amount::from_sat(self.config.dust_threshold_sats))
            .build(
                selection.chosen(),
                &envelope,
                Some(&request.funding_address),
                selection.fee(),
            )?;

        info!(
            txid = %transaction.txid(),
            inputs = transaction.tx().input.len(),
            fee = %transaction.fee(),
            "prepared inscription"
        );

        Ok(PreparedInscription {
            request,
            envelope,
            selection,
            transaction,
        })
    }

    /// Prepares a BRC-20 operation inscription.
    pub fn prepare_brc20(
        &self,
        op: &Brc20Operation,
        fee_rate_per_vbyte: f64,
        funding_address: &str,
        receive_address: &str,
    ) -> InscribeResult<PreparedInscription> {
        let req = InscriptionRequest::from_brc20(
            op,
            fee_rate_per_vbyte,
            funding_address,
            receive_address,
            self.config.network,
        )?;
        self.prepare(&req)
    }
}

/// Output of [`Inscriber::prepare`].
#[derive(Debug, Clone)]
pub struct PreparedInscription {
    request: ValidatedRequest,
    envelope: EnvelopeScript,
    selection: Selection,
    transaction: UnsignedTransaction,
}

impl PreparedInscription {
    /// The validated request.
    pub fn request(&self) -> &ValidatedRequest {
        &self.request
    }

    /// The envelope committed to by the inscription output.
    pub fn envelope(&self) -> &EnvelopeScript {
        &self.envelope
    }

    /// The funding selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The unsigned transaction.
    pub fn transaction(&self) -> &UnsignedTransaction {
        &self.transaction
    }

    /// The transaction as base64 PSBT.
    pub fn psbt_base64(&self) -> InscribeResult<String> {
        Ok(self.transaction.to_psbt_base64()?)
    }

    /// Manifest describing this inscription to the order service.
    pub fn order_manifest(&self, file_name: &str) -> OrderManifest {
        OrderManifest::single(
            file_name,
            &self.request.content,
            self.request.fee_rate_per_vbyte.ceil() as u64,
            &self.request.receive_address,
        )
    }

    /// Submits the order manifest to `service`.
    pub fn submit_order<O: OrderService>(
        &self,
        service: &O,
        file_name: &str,
    ) -> InscribeResult<OrderReceipt> {
        let manifest = self.order_manifest(file_name);
        debug!(files = manifest.files.len(), receive_address = %manifest.receive_address, "submitting order");
        Ok(service.submit_manifest(&manifest)?)
    }

    /// Submits `signed`, which must be a signed copy of this transaction.
    pub fn submit_signed<O: OrderService>(
        &self,
        service: &O,
        signed: &Transaction,
    ) -> InscribeResult<OrderReceipt> {
        let expected = self.transaction.txid();
        let txid = signed.compute_txid();
        if txid != expected {
            return Err(InscribeError::Protocol(format!(
                "signed transaction {txid} does not match prepared {expected}"
            )));
        }
        Ok(service.submit_signed_tx(signed)?)
    }
}
