use bitcoin::{Script, ScriptBuf};

use crate::InscriptionContent;
use crate::errors::EnvelopeParseResult;
use crate::parser::parse_envelope;

/// A script holding exactly one inscription envelope.
///
/// Only produced by the encoder or by successfully parsing a script, so the
/// wrapped script always decodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnvelopeScript(ScriptBuf);

impl EnvelopeScript {
    pub(crate) fn new_unchecked(script: ScriptBuf) -> Self {
        Self(script)
    }

    /// Borrows the underlying script.
    pub fn as_script(&self) -> &Script {
        &self.0
    }

    /// Converts into the underlying script.
    pub fn into_script(self) -> ScriptBuf {
        self.0
    }

    /// Serialized length of the script in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns if the script is empty, which an envelope never is.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex of the serialized script.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Decodes the content carried by this envelope.
    pub fn decode(&self) -> EnvelopeParseResult<InscriptionContent> {
        parse_envelope(&self.0)
    }
}

impl AsRef<Script> for EnvelopeScript {
    fn as_ref(&self) -> &Script {
        &self.0
    }
}

impl TryFrom<ScriptBuf> for EnvelopeScript {
    type Error = crate::errors::EnvelopeParseError;

    fn try_from(script: ScriptBuf) -> Result<Self, Self::Error> {
        parse_envelope(&script)?;
        Ok(Self(script))
    }
}

impl From<EnvelopeScript> for ScriptBuf {
    fn from(envelope: EnvelopeScript) -> Self {
        envelope.0
    }
}
