//!
//! Recognition of standard output scripts relevant to the protocol.
//!

use crate::{envelope::ENVELOPE_MARKER, opcodes::codes::*};
use atomicals_consensus_core::{AtomicalId, atomical_id::ATOMICAL_ID_SIZE};

/// `OpData1 'p'`
const PAYMENT_MARKER_OP: [u8; 2] = [OpData1, b'p'];

/// Whether the output script can never be spent (`OP_RETURN`, optionally preceded by `OP_0`)
pub fn is_unspendable(script: &[u8]) -> bool {
    matches!(script, [OpReturn, ..] | [Op0, OpReturn, ..])
}

/// Parses a payment marker output, `[OP_0] OP_RETURN <marker> OpData1 'p' OpData36 <atomical id>`,
/// returning the id of the atomical the transaction pays for
pub fn payment_marker_atomical_id(script: &[u8]) -> Option<AtomicalId> {
    let rest = match script {
        [Op0, OpReturn, rest @ ..] | [OpReturn, rest @ ..] => rest,
        _ => return None,
    };
    let rest = rest.strip_prefix(&ENVELOPE_MARKER[..])?.strip_prefix(&PAYMENT_MARKER_OP[..])?.strip_prefix(&[OpData36][..])?;
    AtomicalId::from_bytes(rest.get(..ATOMICAL_ID_SIZE)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomicals_hashes::Hash;

    fn marker_script(prefix: &[u8], id: &AtomicalId) -> Vec<u8> {
        let mut script = prefix.to_vec();
        script.extend(ENVELOPE_MARKER);
        script.extend(PAYMENT_MARKER_OP);
        script.push(OpData36);
        script.extend(id.to_bytes());
        script
    }

    #[test]
    fn test_is_unspendable() {
        assert!(is_unspendable(&[OpReturn]));
        assert!(is_unspendable(&[OpReturn, OpData1, 1]));
        assert!(is_unspendable(&[Op0, OpReturn]));
        assert!(!is_unspendable(&[]));
        assert!(!is_unspendable(&[Op0]));
        assert!(!is_unspendable(&[Op1, OpReturn]));
    }

    #[test]
    fn test_payment_marker() {
        let id = AtomicalId::new(Hash::from_bytes([5; 32]), 2);
        assert_eq!(payment_marker_atomical_id(&marker_script(&[OpReturn], &id)), Some(id));
        assert_eq!(payment_marker_atomical_id(&marker_script(&[Op0, OpReturn], &id)), Some(id));

        let mut trailing = marker_script(&[OpReturn], &id);
        trailing.push(0xff);
        assert_eq!(payment_marker_atomical_id(&trailing), Some(id));

        let full = marker_script(&[OpReturn], &id);
        assert_eq!(payment_marker_atomical_id(&full[..full.len() - 1]), None);
        assert_eq!(payment_marker_atomical_id(&marker_script(&[Op1], &id)), None);

        let mut wrong_op = marker_script(&[OpReturn], &id);
        wrong_op[7] = b'q';
        assert_eq!(payment_marker_atomical_id(&wrong_op), None);
    }
}
