use anyhow::{Context, Result};
use clap::Args;
use ordkit_envelope_fmt::EnvelopeEncoder;
use ordkit_inscriber::InscriberConfig;
use ordkit_tx_builder::{FUNDING_OUTPUT_COUNT, FeeEstimator, fee_rate_from_sat_per_vb};
use serde::Serialize;

use crate::content::ContentArgs;

#[derive(Debug, Args)]
pub(crate) struct EstimateFeeArgs {
    #[command(flatten)]
    content: ContentArgs,

    /// Fee rate in sat/vB
    #[arg(long)]
    fee_rate: f64,

    /// Number of funding inputs
    #[arg(long, default_value_t = 1)]
    inputs: usize,

    /// Number of outputs
    #[arg(long, default_value_t = FUNDING_OUTPUT_COUNT)]
    outputs: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateOutput {
    envelope_len: usize,
    weight: u64,
    vsize: u64,
    fee_sats: u64,
}

pub(crate) fn handle_estimate(args: EstimateFeeArgs, config: &InscriberConfig) -> Result<()> {
    let fee_rate = fee_rate_from_sat_per_vb(args.fee_rate)
        .context("fee rate must be a positive number of sat/vB")?;
    let envelope = EnvelopeEncoder::new(config.max_content_len).encode(&args.content.load()?)?;
    let estimator = FeeEstimator::for_envelope(&envelope);

    let output = EstimateOutput {
        envelope_len: envelope.len(),
        weight: estimator.weight(args.inputs, args.outputs).to_wu(),
        vsize: estimator.vsize(args.inputs, args.outputs),
        fee_sats: estimator.estimate(args.inputs, args.outputs, fee_rate).to_sat(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
