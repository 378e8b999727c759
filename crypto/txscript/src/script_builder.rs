use crate::{
    envelope::ENVELOPE_MARKER,
    opcodes::{OP_DATA_MAX_VAL, codes::*},
};
use atomicals_consensus_core::OpType;
use std::iter::once;
use thiserror::Error;

/// Largest data element a single push may carry
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// DEFAULT_SCRIPT_ALLOC is the default size used for the backing array
/// of a script being built by the ScriptBuilder
const DEFAULT_SCRIPT_ALLOC: usize = 512;

#[derive(Error, PartialEq, Eq, Debug, Clone, Copy)]
pub enum ScriptBuilderError {
    #[error("adding a data element of {0} bytes exceed the maximum allowed script element size of {MAX_SCRIPT_ELEMENT_SIZE}")]
    ElementExceedsMaxSize(usize),
}
pub type ScriptBuilderResult<T> = std::result::Result<T, ScriptBuilderError>;

/// ScriptBuilder provides a facility for building witness scripts.
///
/// Data is always pushed literally (`OpData#` / `OpPushData#`), never as a small integer
/// opcode, so the pushed bytes read back exactly as written.
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self { script: Vec::with_capacity(DEFAULT_SCRIPT_ALLOC) }
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn drain(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.script)
    }

    pub fn add_op(&mut self, opcode: u8) -> &mut Self {
        self.script.push(opcode);
        self
    }

    /// Pushes `data` using the shortest literal push encoding. Empty data is pushed as `Op0`.
    pub fn add_data(&mut self, data: &[u8]) -> ScriptBuilderResult<&mut Self> {
        let data_len = data.len();
        if data_len > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(ScriptBuilderError::ElementExceedsMaxSize(data_len));
        }
        if data_len <= OP_DATA_MAX_VAL as usize {
            self.script.push(data_len as u8);
        } else if data_len <= u8::MAX as usize {
            self.script.extend(once(OpPushData1).chain(once(data_len as u8)));
        } else {
            self.script.extend(once(OpPushData2).chain((data_len as u16).to_le_bytes()));
        }
        self.script.extend(data);
        Ok(self)
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds reveal witness scripts carrying an operation envelope:
///
/// ```text
/// <key> OP_CHECKSIG OP_0 OP_IF <"atom"> <op> <payload chunks...> OP_ENDIF
/// ```
pub struct EnvelopeBuilder {
    key: [u8; 32],
    payload: Vec<u8>,
}

impl EnvelopeBuilder {
    pub fn new(key: &[u8; 32]) -> Self {
        Self { key: *key, payload: Vec::new() }
    }

    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    pub fn build(&self, op: OpType) -> ScriptBuilderResult<Vec<u8>> {
        let mut builder = ScriptBuilder::new();
        builder.add_data(&self.key)?.add_op(OpCheckSig).add_op(Op0).add_op(OpIf);
        builder.add_data(&ENVELOPE_MARKER[1..])?.add_data(op.as_str().as_bytes())?;
        for chunk in self.payload.chunks(MAX_SCRIPT_ELEMENT_SIZE) {
            builder.add_data(chunk)?;
        }
        builder.add_op(OpEndIf);
        Ok(builder.drain())
    }
}
