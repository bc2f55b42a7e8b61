//! Stack-based bytecode virtual machine.

use std::io::{self, Write};
use std::rc::Rc;

use crate::bytecode::chunk::Chunk;
use crate::bytecode::instruction::OpCode;
use crate::bytecode::value::Value;
use crate::error::RuntimeError;

/// Outcome of interpreting a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

/// The virtual machine. Holds the operand stack; the chunk being executed
/// is borrowed per call, so one VM can run several chunks in sequence (the
/// REPL reuses a single instance).
pub struct Vm {
    stack: Vec<Value>,
    /// The last runtime fault, kept for callers that want more than the
    /// coarse [`InterpretResult`].
    last_error: Option<RuntimeError>,
}

impl Vm {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            last_error: None,
        }
    }

    pub fn last_error(&self) -> Option<&RuntimeError> {
        self.last_error.as_ref()
    }

    /// Compile and run source text in one step. Front-end diagnostics are
    /// reported on stderr and yield `CompileError` without executing any
    /// part of the program.
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        match crate::compile(source) {
            Ok(chunk) => self.run(&chunk),
            Err(errors) => {
                for error in &errors {
                    eprintln!("{error}");
                }
                InterpretResult::CompileError
            }
        }
    }

    /// Execute a chunk, printing to stdout.
    pub fn run(&mut self, chunk: &Chunk) -> InterpretResult {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(chunk, &mut out)
    }

    /// Execute a chunk, printing to the given writer. Runtime faults report
    /// their diagnostic on stderr, clear the stack, and halt execution.
    pub fn run_with_output<W: Write>(&mut self, chunk: &Chunk, out: &mut W) -> InterpretResult {
        self.last_error = None;
        let mut ip = 0;

        while ip < chunk.code.len() {
            let offset = ip;
            let line = chunk.get_line(offset);

            #[cfg(feature = "trace")]
            self.trace(chunk, offset);

            let Some(op) = OpCode::from_u8(chunk.code[ip]) else {
                return self.fault(RuntimeError::UnknownOpcode(chunk.code[ip], line));
            };
            ip += 1;

            match op {
                OpCode::Constant => {
                    // The operand byte may be missing in a hand-built chunk
                    let Some(&index) = chunk.code.get(ip) else {
                        return self.fault(RuntimeError::UnknownOpcode(op as u8, line));
                    };
                    ip += 1;
                    match chunk.constants.get(index as usize) {
                        Some(value) => self.stack.push(value.clone()),
                        None => return self.fault(RuntimeError::UnknownOpcode(op as u8, line)),
                    }
                }

                OpCode::Add => {
                    let (b, a) = match self.pop_pair(line) {
                        Ok(pair) => pair,
                        Err(err) => return self.fault(err),
                    };
                    let result = match (&a, &b) {
                        (Value::Number(x), Value::Number(y)) => Value::Number(x + y),
                        (Value::Str(x), Value::Str(y)) => {
                            let mut joined = String::with_capacity(x.len() + y.len());
                            joined.push_str(x);
                            joined.push_str(y);
                            Value::Str(Rc::new(joined))
                        }
                        _ => return self.fault(RuntimeError::AddTypeMismatch(line)),
                    };
                    self.stack.push(result);
                }

                OpCode::Subtract => {
                    if let Err(err) = self.numeric_binary(line, |a, b| Value::Number(a - b)) {
                        return self.fault(err);
                    }
                }
                OpCode::Multiply => {
                    if let Err(err) = self.numeric_binary(line, |a, b| Value::Number(a * b)) {
                        return self.fault(err);
                    }
                }
                OpCode::Divide => {
                    let (b, a) = match self.pop_pair(line) {
                        Ok(pair) => pair,
                        Err(err) => return self.fault(err),
                    };
                    match (a, b) {
                        (Value::Number(_), Value::Number(y)) if y == 0.0 => {
                            return self.fault(RuntimeError::DivisionByZero(line));
                        }
                        (Value::Number(x), Value::Number(y)) => {
                            self.stack.push(Value::Number(x / y));
                        }
                        _ => return self.fault(RuntimeError::OperandsMustBeNumbers(line)),
                    }
                }

                OpCode::Negate => match self.pop(line) {
                    Ok(Value::Number(n)) => self.stack.push(Value::Number(-n)),
                    Ok(_) => return self.fault(RuntimeError::OperandMustBeNumber(line)),
                    Err(err) => return self.fault(err),
                },

                OpCode::Not => match self.pop(line) {
                    Ok(value) => self.stack.push(Value::Bool(!value.is_truthy())),
                    Err(err) => return self.fault(err),
                },

                OpCode::Equals => {
                    let (b, a) = match self.pop_pair(line) {
                        Ok(pair) => pair,
                        Err(err) => return self.fault(err),
                    };
                    self.stack.push(Value::Bool(a == b));
                }
                OpCode::Greater => {
                    if let Err(err) = self.numeric_binary(line, |a, b| Value::Bool(a > b)) {
                        return self.fault(err);
                    }
                }
                OpCode::Less => {
                    if let Err(err) = self.numeric_binary(line, |a, b| Value::Bool(a < b)) {
                        return self.fault(err);
                    }
                }

                OpCode::Print => match self.pop(line) {
                    Ok(value) => {
                        let _ = writeln!(out, "{value}");
                    }
                    Err(err) => return self.fault(err),
                },

                OpCode::Pop => {
                    if let Err(err) = self.pop(line) {
                        return self.fault(err);
                    }
                }

                OpCode::Return => break,
            }
        }

        InterpretResult::Ok
    }

    fn pop(&mut self, line: u32) -> Result<Value, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow(line))
    }

    /// Pop the two topmost values; the first of the pair is the right-hand
    /// operand because it was pushed last.
    fn pop_pair(&mut self, line: u32) -> Result<(Value, Value), RuntimeError> {
        let b = self.pop(line)?;
        let a = self.pop(line)?;
        Ok((b, a))
    }

    fn numeric_binary(
        &mut self,
        line: u32,
        apply: impl Fn(f64, f64) -> Value,
    ) -> Result<(), RuntimeError> {
        let (b, a) = self.pop_pair(line)?;
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => {
                self.stack.push(apply(x, y));
                Ok(())
            }
            _ => Err(RuntimeError::OperandsMustBeNumbers(line)),
        }
    }

    /// A runtime fault is fatal to the current execution: report it, clear
    /// the operand stack, halt.
    fn fault(&mut self, error: RuntimeError) -> InterpretResult {
        eprintln!("Runtime error: {error}");
        self.stack.clear();
        self.last_error = Some(error);
        InterpretResult::RuntimeError
    }

    #[cfg(feature = "trace")]
    fn trace(&self, chunk: &Chunk, offset: usize) {
        use crate::bytecode::disassembler;

        let mut line = String::from("          ");
        for value in &self.stack {
            line.push_str(&format!("[ {value} ]"));
        }
        eprintln!("{line}");
        eprint!("{}", disassembler::disassemble_instruction(chunk, offset).0);
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
