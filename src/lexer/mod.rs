//! Lexer module for Langlang.

pub mod scanner;
pub mod token;

pub use scanner::{ScanResult, Scanner};
pub use token::{Token, TokenKind};
