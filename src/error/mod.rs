//! Error types for all pipeline phases.

use thiserror::Error;

/// Lexical errors. The scanner reports these as diagnostics and keeps
/// scanning, so they accumulate rather than abort the scan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("[line {1}] Unexpected character '{0}'")]
    UnexpectedChar(char, u32),

    #[error("[line {0}] Unterminated string")]
    UnterminatedString(u32),

    #[error("[line {0}] Inconsistent indentation")]
    InconsistentIndentation(u32),
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnexpectedChar(_, line) => *line,
            Self::UnterminatedString(line) => *line,
            Self::InconsistentIndentation(line) => *line,
        }
    }
}

/// Parser errors. One is reported per malformed statement; the parser
/// synchronizes to the next statement boundary and continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("[line {line}] Expect {expected}, found '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: u32,
    },

    #[error("[line {line}] Expect expression, found '{found}'")]
    ExpectedExpression { found: String, line: u32 },

    #[error("[line {0}] Expect newline or ';' after statement")]
    ExpectedStatementEnd(u32),

    #[error("[line {line}] Expect '{{' or an indented block after {context}")]
    ExpectedBlock { context: String, line: u32 },

    #[error("[line {line}] Invalid number literal '{lexeme}'")]
    InvalidNumber { lexeme: String, line: u32 },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnexpectedToken { line, .. } => *line,
            Self::ExpectedExpression { line, .. } => *line,
            Self::ExpectedStatementEnd(line) => *line,
            Self::ExpectedBlock { line, .. } => *line,
            Self::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Code generation errors. The compiler keeps traversing sibling nodes after
/// an error so diagnostics accumulate; the chunk is discarded as a whole.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("[line {line}] Variables are not supported yet: '{name}'")]
    UnsupportedVariable { name: String, line: u32 },

    #[error("[line {line}] {construct} are not supported yet")]
    Unsupported { construct: &'static str, line: u32 },

    #[error("[line {0}] Too many constants in one chunk")]
    TooManyConstants(u32),
}

impl CompileError {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnsupportedVariable { line, .. } => *line,
            Self::Unsupported { line, .. } => *line,
            Self::TooManyConstants(line) => *line,
        }
    }
}

/// Runtime errors. Immediately fatal to the current execution: the VM clears
/// its operand stack and halts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("[line {0}] Operands must be two numbers or two strings")]
    AddTypeMismatch(u32),

    #[error("[line {0}] Operands must be numbers")]
    OperandsMustBeNumbers(u32),

    #[error("[line {0}] Operand must be a number")]
    OperandMustBeNumber(u32),

    #[error("[line {0}] Division by zero")]
    DivisionByZero(u32),

    #[error("[line {1}] Unknown opcode {0}")]
    UnknownOpcode(u8, u32),

    #[error("[line {0}] Stack underflow")]
    StackUnderflow(u32),
}

impl RuntimeError {
    pub fn line(&self) -> u32 {
        match self {
            Self::AddTypeMismatch(line) => *line,
            Self::OperandsMustBeNumbers(line) => *line,
            Self::OperandMustBeNumber(line) => *line,
            Self::DivisionByZero(line) => *line,
            Self::UnknownOpcode(_, line) => *line,
            Self::StackUnderflow(line) => *line,
        }
    }
}

/// A unified error type for all phases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LanglangError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}
