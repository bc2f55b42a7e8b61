//! Langlang: a small indentation-aware language compiled to stack-machine
//! bytecode.
//!
//! The pipeline is strictly sequential: the scanner produces tokens, the
//! parser builds an AST with per-statement error recovery, the compiler
//! lowers the tree into a single bytecode chunk, and the VM executes it.
//! Diagnostics from any front-end phase gate execution; a program that
//! reported a lexical or syntax error never runs, even though scanning and
//! parsing themselves continue best-effort to surface further errors.

#![allow(clippy::module_inception)]
#![allow(clippy::new_without_default)]

pub mod ast;
pub mod bytecode;
pub mod error;
pub mod lexer;
pub mod parser;

use bytecode::Chunk;
use error::LanglangError;
use lexer::Scanner;
use parser::Parser;

/// Compile source text into a chunk, collecting diagnostics from every
/// front-end phase. Any diagnostic at all yields `Err`; there is no partial
/// execution of a program that failed to scan, parse, or compile.
pub fn compile(source: &str) -> Result<Chunk, Vec<LanglangError>> {
    let scanned = Scanner::new(source).scan_tokens();
    let mut errors: Vec<LanglangError> = scanned
        .diagnostics
        .into_iter()
        .map(LanglangError::from)
        .collect();

    let (statements, parse_errors) = Parser::new(scanned.tokens).parse();
    errors.extend(parse_errors.into_iter().map(LanglangError::from));

    // Code generation still runs over the recovered statement list so its
    // diagnostics surface in the same pass as the front-end ones.
    match bytecode::compiler::compile(&statements) {
        Ok(chunk) if errors.is_empty() => Ok(chunk),
        Ok(_) => Err(errors),
        Err(compile_errors) => {
            errors.extend(compile_errors.into_iter().map(LanglangError::from));
            Err(errors)
        }
    }
}
