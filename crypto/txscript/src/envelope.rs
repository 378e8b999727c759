//!
//! Locates the protocol envelope inside a witness element:
//!
//! ```text
//! <32 byte key> ... OP_IF <push "atom"> <push op> <payload pushes...> OP_ENDIF
//! ```
//!

use crate::opcodes::{ScriptInstruction, codes::*, parse_script};
use atomicals_consensus_core::OpType;
use atomicals_core::debug;
use atomicals_txscript_errors::TxScriptResult;

/// `OpData4 "atom"`
pub const ENVELOPE_MARKER: [u8; 5] = [OpData4, b'a', b't', b'o', b'm'];

/// Key push (33) + `OP_IF` + marker
pub const MIN_ENVELOPE_SCRIPT_LEN: usize = 39;

const KEY_PUSH_LEN: usize = 1 + 32;

/// Push-encoded operation names
const OPERATION_CODES: [(&[u8], OpType); 10] = [
    (b"\x03nft", OpType::Nft),
    (b"\x03dft", OpType::Dft),
    (b"\x03mod", OpType::Mod),
    (b"\x03evt", OpType::Evt),
    (b"\x03dmt", OpType::Dmt),
    (b"\x03dat", OpType::Dat),
    (b"\x02ft", OpType::Ft),
    (b"\x02sl", OpType::Seal),
    (b"\x01x", OpType::Extract),
    (b"\x01y", OpType::Skip),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub op: OpType,
    /// Concatenation of all pushes following the operation, up to `OP_ENDIF`
    pub payload: Vec<u8>,
}

/// Concatenates the data of all pushes up to `OP_ENDIF` (or the end of the script).
/// Other opcodes are skipped.
pub fn parse_envelope_payload(script: &[u8]) -> TxScriptResult<Vec<u8>> {
    let mut payload = Vec::new();
    for instruction in parse_script(script) {
        match instruction? {
            ScriptInstruction::Op(OpEndIf) => break,
            ScriptInstruction::Push(data) => payload.extend_from_slice(data),
            ScriptInstruction::Op(_) => {}
        }
    }
    Ok(payload)
}

/// Decodes the operation starting at `pos`. At least one byte must follow the operation name.
fn parse_operation(script: &[u8], pos: usize) -> TxScriptResult<Option<Envelope>> {
    for (code, op) in OPERATION_CODES {
        let end = pos + code.len();
        if end < script.len() && &script[pos..end] == code {
            return Ok(Some(Envelope { op, payload: parse_envelope_payload(&script[end..])? }));
        }
    }
    Ok(None)
}

/// Searches one witness element for the envelope.
///
/// Returns `Ok(None)` when the element does not start with a 32 byte key push, has no `OP_IF`
/// followed by the marker, or names an unknown operation. A malformed push inside the payload
/// is an error.
pub fn parse_envelope(script: &[u8]) -> TxScriptResult<Option<Envelope>> {
    if script.len() < MIN_ENVELOPE_SCRIPT_LEN || script[0] != OpData32 {
        return Ok(None);
    }
    let scan_end = script.len() - ENVELOPE_MARKER.len();
    let mut pos = KEY_PUSH_LEN;
    while pos < scan_end {
        let opcode = script[pos];
        pos += 1;
        if opcode == OpIf && script.get(pos..pos + ENVELOPE_MARKER.len()) == Some(&ENVELOPE_MARKER[..]) {
            return parse_operation(script, pos + ENVELOPE_MARKER.len());
        }
    }
    Ok(None)
}

/// Scans the elements of an input witness in order. The first element holding an envelope with
/// a known operation wins; elements failing to parse are skipped.
pub fn parse_witness_envelope(witness: &[Vec<u8>]) -> Option<Envelope> {
    for element in witness {
        match parse_envelope(element) {
            Ok(Some(envelope)) => return Some(envelope),
            Ok(None) => {}
            Err(err) => debug!("skipping witness element with malformed envelope: {err}"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script_builder::EnvelopeBuilder;
    use atomicals_txscript_errors::TxScriptError;

    const KEY: [u8; 32] = [7; 32];

    #[test]
    fn test_parse_envelope_ops() {
        for (_, op) in OPERATION_CODES {
            let script = EnvelopeBuilder::new(&KEY).payload(&[0xa0]).build(op).unwrap();
            assert_eq!(parse_envelope(&script), Ok(Some(Envelope { op, payload: vec![0xa0] })), "{op}");
        }
    }

    #[test]
    fn test_payload_chunks_are_concatenated() {
        let payload: Vec<u8> = (0..1500u32).map(|i| i as u8).collect();
        let script = EnvelopeBuilder::new(&KEY).payload(&payload).build(OpType::Nft).unwrap();
        let envelope = parse_envelope(&script).unwrap().unwrap();
        assert_eq!(envelope.payload, payload);
    }

    #[test]
    fn test_no_envelope() {
        let script = EnvelopeBuilder::new(&KEY).payload(&[1]).build(OpType::Nft).unwrap();

        // Too short or missing key push
        assert_eq!(parse_envelope(&script[..38]), Ok(None));
        let mut no_key = script.clone();
        no_key[0] = OpData2;
        assert_eq!(parse_envelope(&no_key), Ok(None));

        // Wrong marker
        let mut wrong_marker = script.clone();
        let marker_pos = script.windows(5).position(|w| w == ENVELOPE_MARKER).unwrap();
        wrong_marker[marker_pos + 4] = b'n';
        assert_eq!(parse_envelope(&wrong_marker), Ok(None));

        // Unknown operation
        let mut unknown = script.clone();
        unknown[marker_pos + 6] = b'z';
        assert_eq!(parse_envelope(&unknown), Ok(None));
    }

    #[test]
    fn test_operation_needs_trailing_byte() {
        let mut script = vec![OpData32];
        script.extend(KEY);
        script.extend([OpCheckSig, Op0, OpIf]);
        script.extend(ENVELOPE_MARKER);
        script.extend(b"\x02ft");
        assert_eq!(parse_envelope(&script), Ok(None));
        script.push(OpEndIf);
        assert_eq!(parse_envelope(&script), Ok(Some(Envelope { op: OpType::Ft, payload: vec![] })));
    }

    #[test]
    fn test_malformed_payload_push() {
        let mut script = EnvelopeBuilder::new(&KEY).payload(&[]).build(OpType::Nft).unwrap();
        script.pop(); // OP_ENDIF
        script.extend([OpPushData1, 10, 1, 2]);
        assert_eq!(parse_envelope(&script), Err(TxScriptError::MalformedPush(10, 2)));
    }

    #[test]
    fn test_witness_first_match_wins() {
        let bad = {
            let mut script = EnvelopeBuilder::new(&KEY).payload(&[]).build(OpType::Nft).unwrap();
            script.pop();
            script.extend([OpData2, 1]);
            script
        };
        let dat = EnvelopeBuilder::new(&KEY).payload(&[1]).build(OpType::Dat).unwrap();
        let ft = EnvelopeBuilder::new(&KEY).payload(&[2]).build(OpType::Ft).unwrap();

        let witness = vec![vec![0x30; 64], bad, dat, ft];
        assert_eq!(parse_witness_envelope(&witness), Some(Envelope { op: OpType::Dat, payload: vec![1] }));
        assert_eq!(parse_witness_envelope(&witness[..2]), None);
        assert_eq!(parse_witness_envelope(&[]), None);
    }
}
