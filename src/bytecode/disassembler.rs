//! Human-readable chunk listings, used by `--disassemble` and the VM's
//! execution trace. A debugging aid only; execution never depends on it.

use std::fmt::Write;

use crate::bytecode::chunk::Chunk;
use crate::bytecode::instruction::OpCode;

/// Render a whole chunk, one instruction per line, headed by `name`.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut listing = format!("== {name} ==\n");
    let mut offset = 0;
    while offset < chunk.code.len() {
        let (text, next) = disassemble_instruction(chunk, offset);
        listing.push_str(&text);
        offset = next;
    }
    listing
}

/// Render the instruction at `offset`; returns the text and the offset of
/// the following instruction. A byte outside the opcode range is shown as
/// `UNKNOWN` and skipped, so a listing can always be produced.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut text = format!("{offset:04} ");

    let line = chunk.get_line(offset);
    if offset > 0 && line == chunk.get_line(offset - 1) {
        text.push_str("   | ");
    } else {
        let _ = write!(text, "{line:4} ");
    }

    let Some(op) = OpCode::from_u8(chunk.code[offset]) else {
        let _ = writeln!(text, "UNKNOWN {:#04x}", chunk.code[offset]);
        return (text, offset + 1);
    };

    match op {
        OpCode::Constant => {
            let index = chunk.code.get(offset + 1).copied().unwrap_or(0);
            let _ = write!(text, "{op:<16} {index:4}");
            match chunk.constants.get(index as usize) {
                Some(value) => {
                    let _ = writeln!(text, " '{value}'");
                }
                None => {
                    let _ = writeln!(text, " <bad index>");
                }
            }
        }
        _ => {
            let _ = writeln!(text, "{op}");
        }
    }

    (text, offset + 1 + op.operand_size())
}
