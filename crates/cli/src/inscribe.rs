use anyhow::{Result, bail};
use bitcoin::Txid;
use clap::Args;
use ordkit_esplora::HttpOrderService;
use ordkit_inscriber::{Inscriber, InscriberConfig, InscriptionRequest};
use serde::Serialize;
use tracing::*;

use crate::content::ContentArgs;

/// Funding parameters shared by every transaction-building command
#[derive(Debug, Args)]
pub(crate) struct FundingArgs {
    /// Fee rate in sat/vB
    #[arg(long)]
    pub(crate) fee_rate: f64,

    /// Address whose UTXOs fund the transaction and which receives change
    #[arg(long)]
    pub(crate) funding_address: String,

    /// Address receiving the inscription, defaults to the funding address
    #[arg(long)]
    pub(crate) receive_address: Option<String>,

    /// Also submit an order manifest to the configured order service
    #[arg(long)]
    pub(crate) submit_order: bool,
}

impl FundingArgs {
    pub(crate) fn receive_address(&self) -> &str {
        self.receive_address
            .as_deref()
            .unwrap_or(&self.funding_address)
    }
}

#[derive(Debug, Args)]
pub(crate) struct InscribeArgs {
    #[command(flatten)]
    content: ContentArgs,

    #[command(flatten)]
    funding: FundingArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreparedOutput {
    psbt: String,
    txid: Txid,
    inputs: usize,
    fee_sats: u64,
    change_sats: Option<u64>,
    envelope_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
}

pub(crate) fn handle_inscribe(args: InscribeArgs, config: InscriberConfig) -> Result<()> {
    let file_name = args.content.file_name();
    let (content_type, content) = args.content.load()?.into_parts();
    let req = InscriptionRequest {
        content,
        content_type,
        fee_rate_per_vbyte: args.funding.fee_rate,
        funding_address: args.funding.funding_address.clone(),
        receive_address: args.funding.receive_address().to_owned(),
        network: config.network,
    };
    prepare_and_print(&req, &args.funding, config, &file_name)
}

pub(crate) fn prepare_and_print(
    req: &InscriptionRequest,
    funding: &FundingArgs,
    config: InscriberConfig,
    file_name: &str,
) -> Result<()> {
    let inscriber = Inscriber::from_config(config)?;
    let prepared = inscriber.prepare(req)?;

    let order_id = if funding.submit_order {
        let Some(base) = &inscriber.config().order_service_base else {
            bail!("--submit-order needs order_service_base in the config file");
        };
        let service = HttpOrderService::new(base, inscriber.config().request_timeout())?;
        let receipt = prepared.submit_order(&service, file_name)?;
        info!(order_id = %receipt.order_id, "order submitted");
        Some(receipt.order_id)
    } else {
        None
    };

    let utx = prepared.transaction();
    let output = PreparedOutput {
        psbt: prepared.psbt_base64()?,
        txid: utx.txid(),
        inputs: utx.tx().input.len(),
        fee_sats: utx.fee().to_sat(),
        change_sats: utx.change().map(|c| c.to_sat()),
        envelope_hex: prepared.envelope().to_hex(),
        order_id,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
