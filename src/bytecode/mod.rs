//! Bytecode representation, compiler, and virtual machine.

pub mod chunk;
pub mod compiler;
pub mod disassembler;
pub mod instruction;
pub mod value;
pub mod vm;

pub use chunk::{Chunk, MAX_CONSTANTS};
pub use instruction::OpCode;
pub use value::Value;
pub use vm::{InterpretResult, Vm};
