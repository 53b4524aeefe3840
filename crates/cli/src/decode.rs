use anyhow::{Context, Result};
use bitcoin::ScriptBuf;
use clap::Args;
use ordkit_brc20_fmt::Brc20Operation;
use ordkit_envelope_fmt::parse_envelope;
use serde::Serialize;

#[derive(Debug, Args)]
pub(crate) struct DecodeArgs {
    /// Script hex containing an inscription envelope
    envelope_hex: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodeOutput {
    content_type: String,
    size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    body_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    brc20: Option<String>,
}

pub(crate) fn handle_decode(args: DecodeArgs) -> Result<()> {
    let bytes = hex::decode(args.envelope_hex.trim()).context("envelope is not valid hex")?;
    let content = parse_envelope(&ScriptBuf::from_bytes(bytes))?;

    let brc20 = Brc20Operation::from_json(content.body())
        .ok()
        .map(|op| format!("{} {}", op.op(), op.tick()));
    let output = DecodeOutput {
        content_type: content.content_type().to_owned(),
        size: content.len(),
        text: std::str::from_utf8(content.body()).ok().map(str::to_owned),
        body_hex: hex::encode(content.body()),
        brc20,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
