//! Bytecode chunk containing instructions and constants.

use crate::bytecode::instruction::OpCode;
use crate::bytecode::value::Value;

/// Maximum number of entries in a chunk's constant pool. Constant indices
/// are single operand bytes, so the pool cannot address more than this.
pub const MAX_CONSTANTS: usize = 256;

/// A chunk of bytecode with its constant pool and line metadata.
///
/// `lines` runs parallel to `code`: `lines[i]` is the source line that
/// produced the byte at `code[i]`, used for runtime error reporting.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub code: Vec<u8>,
    pub constants: Vec<Value>,
    pub lines: Vec<u32>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an opcode to the chunk.
    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.code.push(op as u8);
        self.lines.push(line);
    }

    /// Write a raw operand byte to the chunk.
    pub fn write_byte(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        self.lines.push(line);
    }

    /// Add a constant to the pool and return its index, reusing an existing
    /// entry when an equal value is already present. Returns `None` once the
    /// pool is full.
    pub fn add_constant(&mut self, value: Value) -> Option<u8> {
        for (i, existing) in self.constants.iter().enumerate() {
            if existing == &value {
                return Some(i as u8);
            }
        }
        if self.constants.len() >= MAX_CONSTANTS {
            return None;
        }
        let index = self.constants.len() as u8;
        self.constants.push(value);
        Some(index)
    }

    /// Get the source line for the byte at `offset`, 0 when out of range.
    pub fn get_line(&self, offset: usize) -> u32 {
        self.lines.get(offset).copied().unwrap_or(0)
    }
}
