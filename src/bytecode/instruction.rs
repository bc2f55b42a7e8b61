//! Bytecode instruction definitions for the Langlang VM.

use std::fmt;

/// Opcodes for the bytecode virtual machine.
///
/// Every instruction is a single opcode byte, optionally followed by one
/// operand byte. Only `Constant` carries an operand: the index of the value
/// to load from the constant pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// Load a constant from the constant pool: CONSTANT <index:u8>
    Constant = 0,

    /// Add two values: a + b (numbers or strings)
    Add,
    /// Subtract two numbers: a - b
    Subtract,
    /// Multiply two numbers: a * b
    Multiply,
    /// Divide two numbers: a / b
    Divide,
    /// Negate a number: -a
    Negate,
    /// Logical not via truthiness: !a
    Not,

    /// Structural equality: a == b
    Equals,
    /// Numeric greater-than: a > b
    Greater,
    /// Numeric less-than: a < b
    Less,

    /// Pop the top value and print it followed by a newline
    Print,
    /// Pop and discard the top value
    Pop,
    /// Halt execution of the chunk
    Return,
}

impl OpCode {
    const LAST: u8 = OpCode::Return as u8;

    /// Decode a raw byte, rejecting anything outside the opcode range.
    pub fn from_u8(byte: u8) -> Option<OpCode> {
        if byte <= Self::LAST {
            // Safety: OpCode is repr(u8) with contiguous discriminants
            // from 0 to LAST, and byte is within that range.
            Some(unsafe { std::mem::transmute::<u8, OpCode>(byte) })
        } else {
            None
        }
    }

    /// Number of operand bytes that follow this opcode.
    pub fn operand_size(self) -> usize {
        match self {
            OpCode::Constant => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpCode::Constant => "CONSTANT",
            OpCode::Add => "ADD",
            OpCode::Subtract => "SUBTRACT",
            OpCode::Multiply => "MULTIPLY",
            OpCode::Divide => "DIVIDE",
            OpCode::Negate => "NEGATE",
            OpCode::Not => "NOT",
            OpCode::Equals => "EQUALS",
            OpCode::Greater => "GREATER",
            OpCode::Less => "LESS",
            OpCode::Print => "PRINT",
            OpCode::Pop => "POP",
            OpCode::Return => "RETURN",
        };
        // pad() honors width flags so listings can column-align mnemonics
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_every_opcode() {
        for byte in 0..=OpCode::LAST {
            let op = OpCode::from_u8(byte).unwrap();
            assert_eq!(op as u8, byte);
        }
    }

    #[test]
    fn test_rejects_out_of_range_bytes() {
        assert_eq!(OpCode::from_u8(OpCode::LAST + 1), None);
        assert_eq!(OpCode::from_u8(0xff), None);
    }

    #[test]
    fn test_only_constant_takes_an_operand() {
        assert_eq!(OpCode::Constant.operand_size(), 1);
        assert_eq!(OpCode::Add.operand_size(), 0);
        assert_eq!(OpCode::Return.operand_size(), 0);
    }
}
