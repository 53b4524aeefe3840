use bitcoin::{
    blockdata::script,
    constants::MAX_SCRIPT_ELEMENT_SIZE,
    opcodes::{
        OP_FALSE,
        all::{OP_ENDIF, OP_IF, OP_PUSHBYTES_0},
    },
    script::PushBytesBuf,
};

use crate::InscriptionContent;
use crate::errors::{EnvelopeBuildError, EnvelopeBuildResult};
use crate::script::EnvelopeScript;

/// Protocol identifier pushed right after `OP_FALSE OP_IF`.
pub const PROTOCOL_ID: &[u8] = b"ord";

/// Field tag for the content type.
pub const CONTENT_TYPE_TAG: u8 = 1;

/// Largest envelope accepted by standard relay as a P2WSH witness script.
///
/// The inscription output commits to the envelope as its witness script, so
/// an envelope above this can never be revealed through standard nodes, and
/// one above the 10 000 byte consensus script limit can never be spent at all.
pub const MAX_ENVELOPE_LEN: usize = 3_600;

/// Default maximum body length.
///
/// Leaves room under [`MAX_ENVELOPE_LEN`] for the envelope framing, the
/// content type and the chunk push prefixes of common MIME types.
pub const DEFAULT_MAX_CONTENT_LEN: usize = 3_400;

/// Encodes [`InscriptionContent`] into envelope scripts, enforcing a body size
/// limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvelopeEncoder {
    max_content_len: usize,
}

impl Default for EnvelopeEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_LEN)
    }
}

impl EnvelopeEncoder {
    /// Creates an encoder accepting bodies of up to `max_content_len` bytes.
    pub fn new(max_content_len: usize) -> Self {
        Self { max_content_len }
    }

    /// Gets the configured body limit.
    pub fn max_content_len(&self) -> usize {
        self.max_content_len
    }

    /// Builds the envelope script for `content`.
    ///
    /// Creates a script with the structure:
    /// ```text
    /// OP_FALSE OP_IF
    ///   "ord"
    ///   <0x01> <content_type>
    ///   OP_0
    ///   <body_chunk_0> ... <body_chunk_n>
    /// OP_ENDIF
    /// ```
    /// The body is split into chunks of up to [`MAX_SCRIPT_ELEMENT_SIZE`] bytes.
    /// An empty body produces no chunk pushes at all.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeBuildError::ContentTooLarge`] if the body exceeds the
    /// configured limit, and [`EnvelopeBuildError::EnvelopeTooLarge`] if the
    /// encoded script exceeds [`MAX_ENVELOPE_LEN`].
    pub fn encode(&self, content: &InscriptionContent) -> EnvelopeBuildResult<EnvelopeScript> {
        if content.len() > self.max_content_len {
            return Err(EnvelopeBuildError::ContentTooLarge {
                len: content.len(),
                max: self.max_content_len,
            });
        }

        let script = push_envelope(script::Builder::new(), content)?.into_script();
        if script.len() > MAX_ENVELOPE_LEN {
            return Err(EnvelopeBuildError::EnvelopeTooLarge {
                len: script.len(),
                max: MAX_ENVELOPE_LEN,
            });
        }
        Ok(EnvelopeScript::new_unchecked(script))
    }
}

/// Builds an envelope script with the default body limit.
///
/// # Errors
///
/// See [`EnvelopeEncoder::encode`].
pub fn build_envelope_script(content: &InscriptionContent) -> EnvelopeBuildResult<EnvelopeScript> {
    EnvelopeEncoder::default().encode(content)
}

/// Extends the builder with the full envelope for `content`.
fn push_envelope(
    mut builder: script::Builder,
    content: &InscriptionContent,
) -> EnvelopeBuildResult<script::Builder> {
    builder = builder.push_opcode(OP_FALSE).push_opcode(OP_IF);
    builder = push_data(builder, PROTOCOL_ID)?;

    builder = push_data(builder, &[CONTENT_TYPE_TAG])?;
    builder = push_data(builder, content.content_type().as_bytes())?;

    // Empty push separates the fields from the body.
    builder = builder.push_opcode(OP_PUSHBYTES_0);

    for chunk in content.body().chunks(MAX_SCRIPT_ELEMENT_SIZE) {
        builder = push_data(builder, chunk)?;
    }

    builder = builder.push_opcode(OP_ENDIF);
    Ok(builder)
}

fn push_data(builder: script::Builder, data: &[u8]) -> EnvelopeBuildResult<script::Builder> {
    let push_bytes = PushBytesBuf::try_from(data.to_vec())?;
    Ok(builder.push_slice(push_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::blockdata::script::Instruction;

    fn push_sizes(envelope: &EnvelopeScript) -> Vec<usize> {
        envelope
            .as_script()
            .instructions()
            .filter_map(|inst| match inst {
                Ok(Instruction::PushBytes(data)) => Some(data.len()),
                _ => None,
            })
            .collect()
    }

    /// Pushes are: OP_FALSE (empty), "ord", tag, content type, OP_0 (empty),
    /// then the body chunks.
    #[test]
    fn test_body_chunking() {
        let test_cases = vec![
            (0, vec![]),
            (1, vec![1]),
            (520, vec![520]),
            (521, vec![520, 1]),
            (1040, vec![520, 520]),
            (2000, vec![520, 520, 520, 440]),
        ];

        for (body_size, expected_chunks) in test_cases {
            let body: Vec<u8> = (0..body_size).map(|i| (i % 256) as u8).collect();
            let content = InscriptionContent::new("application/octet-stream", body).unwrap();
            let envelope = build_envelope_script(&content).unwrap();

            let mut expected = vec![0, 3, 1, 24, 0];
            expected.extend(expected_chunks);
            assert_eq!(push_sizes(&envelope), expected, "body size {body_size}");
        }
    }

    #[test]
    fn test_hello_world_bytes() {
        let content = InscriptionContent::text("text/plain", "hello world").unwrap();
        let envelope = build_envelope_script(&content).unwrap();

        let mut expected = vec![0x00, 0x63, 0x03];
        expected.extend_from_slice(b"ord");
        expected.extend_from_slice(&[0x01, 0x01, 0x0a]);
        expected.extend_from_slice(b"text/plain");
        expected.extend_from_slice(&[0x00, 0x0b]);
        expected.extend_from_slice(b"hello world");
        expected.push(0x68);

        assert_eq!(envelope.as_script().as_bytes(), expected.as_slice());
        assert_eq!(envelope.len(), 33);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let content = InscriptionContent::new("image/png", vec![7u8; 1500]).unwrap();
        let a = build_envelope_script(&content).unwrap();
        let b = build_envelope_script(&content).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_too_large() {
        let encoder = EnvelopeEncoder::new(10);
        let content = InscriptionContent::new("text/plain", vec![0u8; 11]).unwrap();
        assert_eq!(
            encoder.encode(&content),
            Err(EnvelopeBuildError::ContentTooLarge { len: 11, max: 10 })
        );

        let content = InscriptionContent::new("text/plain", vec![0u8; 10]).unwrap();
        assert!(encoder.encode(&content).is_ok());
    }

    /// 21 bytes of framing for "text/plain", six 520 byte chunks at 523
    /// bytes each, and a 438 byte tail chunk at 441 bytes.
    #[test]
    fn test_envelope_len_boundary() {
        let encoder = EnvelopeEncoder::new(usize::MAX);

        let content = InscriptionContent::new("text/plain", vec![0x42; 3_558]).unwrap();
        let envelope = encoder.encode(&content).unwrap();
        assert_eq!(envelope.len(), MAX_ENVELOPE_LEN);
        assert_eq!(envelope.decode().unwrap(), content);

        let content = InscriptionContent::new("text/plain", vec![0x42; 3_559]).unwrap();
        assert_eq!(
            encoder.encode(&content),
            Err(EnvelopeBuildError::EnvelopeTooLarge {
                len: 3_601,
                max: MAX_ENVELOPE_LEN
            })
        );
    }

    #[test]
    fn test_default_limit_fits_envelope() {
        let content =
            InscriptionContent::new("image/png", vec![0xff; DEFAULT_MAX_CONTENT_LEN]).unwrap();
        let envelope = build_envelope_script(&content).unwrap();
        assert!(envelope.len() <= MAX_ENVELOPE_LEN);

        let content =
            InscriptionContent::new("image/png", vec![0xff; DEFAULT_MAX_CONTENT_LEN + 1]).unwrap();
        assert!(matches!(
            build_envelope_script(&content),
            Err(EnvelopeBuildError::ContentTooLarge { .. })
        ));

        let content = InscriptionContent::new("image/png", vec![0xff; 20_000]).unwrap();
        assert!(matches!(
            EnvelopeEncoder::new(usize::MAX).encode(&content),
            Err(EnvelopeBuildError::EnvelopeTooLarge { .. })
        ));
    }
}
