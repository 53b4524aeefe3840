use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use ordkit_envelope_fmt::InscriptionContent;

/// Content type used for `--text` when none is given.
const DEFAULT_TEXT_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Content to inscribe, from a file or inline text
#[derive(Debug, Args)]
pub(crate) struct ContentArgs {
    /// File whose bytes are inscribed
    #[arg(long, conflicts_with = "text", required_unless_present = "text")]
    pub(crate) file: Option<PathBuf>,

    /// Inline UTF-8 text to inscribe
    #[arg(long)]
    pub(crate) text: Option<String>,

    /// MIME type, required with --file
    #[arg(long)]
    pub(crate) content_type: Option<String>,
}

impl ContentArgs {
    pub(crate) fn load(&self) -> Result<InscriptionContent> {
        let (content_type, body) = match (&self.file, &self.text) {
            (Some(path), _) => {
                let Some(content_type) = &self.content_type else {
                    bail!("--content-type is required with --file");
                };
                let body = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
                (content_type.clone(), body)
            }
            (None, Some(text)) => (
                self.content_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TEXT_CONTENT_TYPE.to_owned()),
                text.as_bytes().to_vec(),
            ),
            (None, None) => bail!("one of --file or --text is required"),
        };
        Ok(InscriptionContent::new(content_type, body)?)
    }

    /// Name reported to the order service.
    pub(crate) fn file_name(&self) -> String {
        self.file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "inscription.txt".to_owned())
    }
}
