use bitcoin::{
    Opcode, Script,
    opcodes::all::{OP_ENDIF, OP_IF, OP_PUSHNUM_1},
    script::{Instruction, Instructions},
};

use crate::InscriptionContent;
use crate::builder::{CONTENT_TYPE_TAG, PROTOCOL_ID};
use crate::errors::{EnvelopeParseError, EnvelopeParseResult};

/// Extract next instruction and try to parse it as an opcode
pub fn next_op(instructions: &mut Instructions<'_>) -> Option<Opcode> {
    let nxt = instructions.next();
    match nxt {
        Some(Ok(Instruction::Op(op))) => Some(op),
        _ => None,
    }
}

/// Parse the inscription carried by a script.
///
/// Skips anything before the first `OP_FALSE OP_IF`, then expects the `ord`
/// protocol push, the tagged fields, an empty push and the body chunks up to
/// `OP_ENDIF`. A content type tag written as `OP_1` is accepted as well.
/// Unknown fields are skipped.
///
/// # Errors
///
/// Returns [`EnvelopeParseError`] if the script does not contain a well-formed
/// envelope with a content type.
pub fn parse_envelope(script: &Script) -> EnvelopeParseResult<InscriptionContent> {
    let mut instructions = script.instructions();

    enter_envelope(&mut instructions)?;

    match instructions.next() {
        Some(Ok(Instruction::PushBytes(id))) if id.as_bytes() == PROTOCOL_ID => {}
        _ => return Err(EnvelopeParseError::MissingProtocolId),
    }

    let (content_type, body_follows) = extract_fields(&mut instructions)?;
    let body = if body_follows {
        extract_until_op_endif(&mut instructions)?
    } else {
        Vec::new()
    };

    let content_type = content_type.ok_or(EnvelopeParseError::MissingContentType)?;
    InscriptionContent::new(content_type, body).map_err(|_| EnvelopeParseError::InvalidContentType)
}

/// Check for consecutive `OP_FALSE` and `OP_IF` that marks the beginning of an envelope
pub fn enter_envelope(instructions: &mut Instructions<'_>) -> EnvelopeParseResult<()> {
    // loop until OP_FALSE is found
    loop {
        let next = instructions.next();
        match next {
            None => {
                return Err(EnvelopeParseError::NoEnvelope);
            }
            // OP_FALSE is basically empty PushBytes
            Some(Ok(Instruction::PushBytes(bytes))) => {
                if bytes.as_bytes().is_empty() {
                    break;
                }
            }
            _ => {
                // Just carry on until OP_FALSE is found
            }
        }
    }

    // Check if next opcode is OP_IF
    let op_if = next_op(instructions);
    if op_if != Some(OP_IF) {
        return Err(EnvelopeParseError::NoEnvelope);
    }
    Ok(())
}

/// Reads tagged fields up to the body separator.
///
/// Returns the content type, if present, and whether a body separator was
/// seen (as opposed to the envelope closing right after the fields).
fn extract_fields(
    instructions: &mut Instructions<'_>,
) -> EnvelopeParseResult<(Option<String>, bool)> {
    let mut content_type = None;

    loop {
        let tag = match instructions.next() {
            None => return Err(EnvelopeParseError::UnterminatedEnvelope),
            Some(Ok(Instruction::Op(OP_ENDIF))) => return Ok((content_type, false)),
            Some(Ok(Instruction::Op(OP_PUSHNUM_1))) => CONTENT_TYPE_TAG,
            Some(Ok(Instruction::PushBytes(bytes))) => match bytes.as_bytes() {
                [] => return Ok((content_type, true)),
                [tag] => *tag,
                _ => return Err(EnvelopeParseError::InvalidInstruction),
            },
            _ => return Err(EnvelopeParseError::InvalidInstruction),
        };

        let value = match instructions.next() {
            Some(Ok(Instruction::PushBytes(value))) => value.as_bytes(),
            None => return Err(EnvelopeParseError::UnterminatedEnvelope),
            _ => return Err(EnvelopeParseError::MissingFieldValue(tag)),
        };

        if tag == CONTENT_TYPE_TAG {
            if content_type.is_some() {
                return Err(EnvelopeParseError::DuplicateField(tag));
            }
            let ty = std::str::from_utf8(value).map_err(|_| EnvelopeParseError::InvalidContentType)?;
            content_type = Some(ty.to_owned());
        }
    }
}

/// Concatenates body pushes until `OP_ENDIF`.
pub fn extract_until_op_endif(instructions: &mut Instructions<'_>) -> EnvelopeParseResult<Vec<u8>> {
    let mut data = vec![];
    loop {
        match instructions.next() {
            Some(Ok(Instruction::Op(OP_ENDIF))) => return Ok(data),
            Some(Ok(Instruction::PushBytes(b))) => data.extend_from_slice(b.as_bytes()),
            None => return Err(EnvelopeParseError::UnterminatedEnvelope),
            _ => return Err(EnvelopeParseError::InvalidInstruction),
        }
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::{
        ScriptBuf,
        opcodes::{
            OP_FALSE,
            all::{OP_CHECKSIG, OP_DROP, OP_PUSHBYTES_0},
        },
        script::{self, PushBytesBuf},
    };
    use proptest::prelude::*;

    use super::*;
    use crate::builder::{EnvelopeEncoder, build_envelope_script};

    fn push(builder: script::Builder, data: &[u8]) -> script::Builder {
        builder.push_slice(PushBytesBuf::try_from(data.to_vec()).unwrap())
    }

    #[test]
    fn test_parse_envelope_data() {
        let content = InscriptionContent::text("text/plain", "hello world").unwrap();
        let script = build_envelope_script(&content).unwrap();
        assert_eq!(parse_envelope(script.as_script()).unwrap(), content);

        // Try with larger size
        let content = InscriptionContent::new("image/webp", vec![1; 2000]).unwrap();
        let script = build_envelope_script(&content).unwrap();
        assert_eq!(script.decode().unwrap(), content);
    }

    #[test]
    fn test_parse_with_prefix() {
        // <pubkey> OP_CHECKSIG before the envelope, as in a tapscript leaf.
        let builder = push(script::Builder::new(), &[2; 32]).push_opcode(OP_CHECKSIG);
        let builder = push(builder.push_opcode(OP_FALSE).push_opcode(OP_IF), PROTOCOL_ID);
        let builder = push(push(builder, &[1]), b"text/plain");
        let builder = push(builder.push_opcode(OP_PUSHBYTES_0), b"hi").push_opcode(OP_ENDIF);

        let content = parse_envelope(&builder.into_script()).unwrap();
        assert_eq!(content.content_type(), "text/plain");
        assert_eq!(content.body(), b"hi");
    }

    #[test]
    fn test_parse_minimal_tag_encoding() {
        let builder = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let builder = push(builder.push_opcode(OP_PUSHNUM_1), b"application/json");
        let builder = push(builder.push_opcode(OP_PUSHBYTES_0), b"{}").push_opcode(OP_ENDIF);

        let content = parse_envelope(&builder.into_script()).unwrap();
        assert_eq!(content.content_type(), "application/json");
        assert_eq!(content.body(), b"{}");
    }

    #[test]
    fn test_parse_skips_unknown_fields() {
        let builder = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let builder = push(push(builder, &[5]), b"metadata");
        let builder = push(push(builder, &[1]), b"text/plain");
        let builder = push(builder.push_opcode(OP_PUSHBYTES_0), b"x").push_opcode(OP_ENDIF);

        let content = parse_envelope(&builder.into_script()).unwrap();
        assert_eq!(content.body(), b"x");
    }

    #[test]
    fn test_parse_without_body_separator() {
        let builder = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let builder = push(push(builder, &[1]), b"text/plain").push_opcode(OP_ENDIF);

        let content = parse_envelope(&builder.into_script()).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_envelope(&ScriptBuf::new()),
            Err(EnvelopeParseError::NoEnvelope)
        );

        let no_if = script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_DROP);
        assert_eq!(
            parse_envelope(&no_if.into_script()),
            Err(EnvelopeParseError::NoEnvelope)
        );

        let wrong_id = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"brc");
        assert_eq!(
            parse_envelope(&wrong_id.into_script()),
            Err(EnvelopeParseError::MissingProtocolId)
        );

        let no_type = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let no_type = push(no_type.push_opcode(OP_PUSHBYTES_0), b"x").push_opcode(OP_ENDIF);
        assert_eq!(
            parse_envelope(&no_type.into_script()),
            Err(EnvelopeParseError::MissingContentType)
        );

        let dup = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let dup = push(push(dup, &[1]), b"text/plain");
        let dup = push(push(dup, &[1]), b"text/html").push_opcode(OP_ENDIF);
        assert_eq!(
            parse_envelope(&dup.into_script()),
            Err(EnvelopeParseError::DuplicateField(1))
        );

        let open = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let open = push(push(open, &[1]), b"text/plain");
        let open = push(open.push_opcode(OP_PUSHBYTES_0), b"x");
        assert_eq!(
            parse_envelope(&open.into_script()),
            Err(EnvelopeParseError::UnterminatedEnvelope)
        );

        let opcode_in_body = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let opcode_in_body = push(push(opcode_in_body, &[1]), b"text/plain");
        let opcode_in_body = opcode_in_body
            .push_opcode(OP_PUSHBYTES_0)
            .push_opcode(OP_CHECKSIG)
            .push_opcode(OP_ENDIF);
        assert_eq!(
            parse_envelope(&opcode_in_body.into_script()),
            Err(EnvelopeParseError::InvalidInstruction)
        );

        let bad_utf8 = push(script::Builder::new().push_opcode(OP_FALSE).push_opcode(OP_IF), b"ord");
        let bad_utf8 = push(push(bad_utf8, &[1]), &[0xff, 0xfe]).push_opcode(OP_ENDIF);
        assert_eq!(
            parse_envelope(&bad_utf8.into_script()),
            Err(EnvelopeParseError::InvalidContentType)
        );
    }

    #[test]
    fn test_try_from_script() {
        let content = InscriptionContent::text("text/plain", "abc").unwrap();
        let envelope = build_envelope_script(&content).unwrap();
        let script: ScriptBuf = envelope.clone().into();
        assert_eq!(crate::EnvelopeScript::try_from(script).unwrap(), envelope);
        assert!(crate::EnvelopeScript::try_from(ScriptBuf::new()).is_err());
    }

    proptest! {
        #[test]
        fn proptest_decode_inverts_encode(
            body in prop::collection::vec(any::<u8>(), 0..3000),
            content_type in "[a-z]{1,12}/[a-z0-9.+-]{1,24}",
        ) {
            let content = InscriptionContent::new(content_type, body).unwrap();
            let envelope = EnvelopeEncoder::new(3000).encode(&content).unwrap();

            let first = envelope.as_script().instructions().next();
            prop_assert!(matches!(first, Some(Ok(Instruction::PushBytes(b))) if b.as_bytes().is_empty()));
            prop_assert_eq!(envelope.as_script().as_bytes().last(), Some(&OP_ENDIF.to_u8()));
            prop_assert_eq!(envelope.decode().unwrap(), content);
        }
    }
}
