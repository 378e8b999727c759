//!
//! The subset of the base ledger opcodes the envelope format relies on, and a push-data reader.
//!

use atomicals_txscript_errors::{TxScriptError, TxScriptResult};
use itertools::Itertools;

#[allow(non_upper_case_globals)]
pub mod codes {
    pub const Op0: u8 = 0x00;
    pub const OpFalse: u8 = Op0;
    pub const OpData1: u8 = 0x01;
    pub const OpData2: u8 = 0x02;
    pub const OpData3: u8 = 0x03;
    pub const OpData4: u8 = 0x04;
    pub const OpData32: u8 = 0x20;
    pub const OpData36: u8 = 0x24;
    pub const OpData75: u8 = 0x4b;
    pub const OpPushData1: u8 = 0x4c;
    pub const OpPushData2: u8 = 0x4d;
    pub const OpPushData4: u8 = 0x4e;
    pub const Op1: u8 = 0x51;
    pub const OpIf: u8 = 0x63;
    pub const OpEndIf: u8 = 0x68;
    pub const OpReturn: u8 = 0x6a;
    pub const OpCheckSig: u8 = 0xac;
}

use codes::*;

pub const OP_DATA_MIN_VAL: u8 = OpData1;
pub const OP_DATA_MAX_VAL: u8 = OpData75;

/// A single decoded script instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptInstruction<'a> {
    /// Data pushed by `OpData#` (including the empty push `Op0`) or `OpPushData1/2/4`
    Push(&'a [u8]),
    /// Any other opcode
    Op(u8),
}

/// Reads a little-endian push length of `N` bytes
fn read_push_len<const N: usize>(it: &mut std::slice::Iter<'_, u8>) -> TxScriptResult<usize> {
    let rest = it.as_slice();
    if rest.len() < N {
        return Err(TxScriptError::MalformedPushSize(rest.to_vec()));
    }
    let mut len = [0u8; 8];
    len[..N].copy_from_slice(&rest[..N]);
    *it = rest[N..].iter();
    Ok(u64::from_le_bytes(len) as usize)
}

/// Decodes the instruction at the iterator position, advancing past it. Returns `None` at the end of the script.
pub fn deserialize_next_instruction<'a>(it: &mut std::slice::Iter<'a, u8>) -> Option<TxScriptResult<ScriptInstruction<'a>>> {
    let opcode = *it.next()?;
    let len = match opcode {
        OpPushData1 => read_push_len::<1>(it),
        OpPushData2 => read_push_len::<2>(it),
        OpPushData4 => read_push_len::<4>(it),
        len if len <= OP_DATA_MAX_VAL => Ok(len as usize),
        opcode => return Some(Ok(ScriptInstruction::Op(opcode))),
    };
    let result = len.and_then(|len| {
        let rest = it.as_slice();
        if len > rest.len() {
            return Err(TxScriptError::MalformedPush(len, rest.len()));
        }
        *it = rest[len..].iter();
        Ok(ScriptInstruction::Push(&rest[..len]))
    });
    if result.is_err() {
        // Nothing after a malformed push can be decoded reliably
        let end = it.as_slice().len();
        *it = it.as_slice()[end..].iter();
    }
    Some(result)
}

/// Iterates the instructions of a script. A malformed push yields one error and ends the iteration.
pub fn parse_script(script: &[u8]) -> impl Iterator<Item = TxScriptResult<ScriptInstruction<'_>>> + '_ {
    script.iter().batching(|it| deserialize_next_instruction(it))
}
