//! Single-pass AST to bytecode compiler.
//!
//! Lowers the statement list in one depth-first traversal, emitting into a
//! single chunk. Constructs outside the executable subset (variables,
//! control flow, declarations) are rejected with a diagnostic; the traversal
//! continues past them so several can be reported in one run.

use crate::ast::{BinaryOp, Expr, ExprKind, LiteralValue, Stmt, StmtKind, UnaryOp};
use crate::bytecode::chunk::Chunk;
use crate::bytecode::instruction::OpCode;
use crate::bytecode::value::Value;
use crate::error::CompileError;

/// Compile a program into a chunk. Any diagnostic discards the chunk as a
/// whole; there is no partial execution of a program that failed to compile.
pub fn compile(statements: &[Stmt]) -> Result<Chunk, Vec<CompileError>> {
    let mut compiler = Compiler::new();
    for stmt in statements {
        compiler.statement(stmt);
    }
    compiler.finish()
}

struct Compiler {
    chunk: Chunk,
    errors: Vec<CompileError>,
    // Line of the statement currently being compiled, for the final Return.
    line: u32,
}

impl Compiler {
    fn new() -> Self {
        Self {
            chunk: Chunk::new(),
            errors: Vec::new(),
            line: 1,
        }
    }

    fn finish(mut self) -> Result<Chunk, Vec<CompileError>> {
        self.chunk.write_op(OpCode::Return, self.line);
        if self.errors.is_empty() {
            Ok(self.chunk)
        } else {
            Err(self.errors)
        }
    }

    fn statement(&mut self, stmt: &Stmt) {
        self.line = stmt.line;
        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.expression(expr);
                // An expression statement's value is always discarded
                self.chunk.write_op(OpCode::Pop, stmt.line);
            }
            StmtKind::Print(expr) => {
                self.expression(expr);
                self.chunk.write_op(OpCode::Print, stmt.line);
            }
            StmtKind::Pass => {}
            StmtKind::Assignment { .. } => self.unsupported("Assignments", stmt.line),
            StmtKind::If { .. } => self.unsupported("If statements", stmt.line),
            StmtKind::While { .. } => self.unsupported("While loops", stmt.line),
            StmtKind::For { .. } => self.unsupported("For loops", stmt.line),
            StmtKind::Return(_) => self.unsupported("Return statements", stmt.line),
            StmtKind::Break => self.unsupported("Break statements", stmt.line),
            StmtKind::Continue => self.unsupported("Continue statements", stmt.line),
            StmtKind::Class { .. } => self.unsupported("Class declarations", stmt.line),
            StmtKind::Task { .. } => self.unsupported("Task declarations", stmt.line),
        }
    }

    fn expression(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(literal) => self.literal(literal, expr.line),
            ExprKind::Grouping(inner) => self.expression(inner),
            ExprKind::Unary { op, operand } => {
                self.expression(operand);
                let op = match op {
                    UnaryOp::Negate => OpCode::Negate,
                    UnaryOp::Not => OpCode::Not,
                };
                self.chunk.write_op(op, expr.line);
            }
            ExprKind::Binary { left, op, right } => {
                self.expression(left);
                self.expression(right);
                self.binary_op(*op, expr.line);
            }
            ExprKind::Logical { .. } => self.unsupported("Logical expressions", expr.line),
            ExprKind::Variable(name) => {
                self.errors.push(CompileError::UnsupportedVariable {
                    name: name.clone(),
                    line: expr.line,
                });
            }
        }
    }

    fn literal(&mut self, literal: &LiteralValue, line: u32) {
        let value = match literal {
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::Str(s) => Value::string(s.clone()),
            LiteralValue::Bool(b) => Value::Bool(*b),
            LiteralValue::Null => Value::Null,
        };
        self.emit_constant(value, line);
    }

    /// Derived comparisons are synthesized from the three primitives:
    /// `a != b` is `!(a == b)`, `a >= b` is `!(a < b)`, `a <= b` is
    /// `!(a > b)`.
    fn binary_op(&mut self, op: BinaryOp, line: u32) {
        let ops: &[OpCode] = match op {
            BinaryOp::Add => &[OpCode::Add],
            BinaryOp::Subtract => &[OpCode::Subtract],
            BinaryOp::Multiply => &[OpCode::Multiply],
            BinaryOp::Divide => &[OpCode::Divide],
            BinaryOp::Equal => &[OpCode::Equals],
            BinaryOp::NotEqual => &[OpCode::Equals, OpCode::Not],
            BinaryOp::Less => &[OpCode::Less],
            BinaryOp::Greater => &[OpCode::Greater],
            BinaryOp::GreaterEqual => &[OpCode::Less, OpCode::Not],
            BinaryOp::LessEqual => &[OpCode::Greater, OpCode::Not],
        };
        for &op in ops {
            self.chunk.write_op(op, line);
        }
    }

    fn emit_constant(&mut self, value: Value, line: u32) {
        match self.chunk.add_constant(value) {
            Some(index) => {
                self.chunk.write_op(OpCode::Constant, line);
                self.chunk.write_byte(index, line);
            }
            None => self.errors.push(CompileError::TooManyConstants(line)),
        }
    }

    fn unsupported(&mut self, construct: &'static str, line: u32) {
        self.errors.push(CompileError::Unsupported { construct, line });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;
    use crate::parser::Parser;

    fn compile_source(source: &str) -> Result<Chunk, Vec<CompileError>> {
        let scanned = Scanner::new(source).scan_tokens();
        assert!(scanned.diagnostics.is_empty());
        let (statements, errors) = Parser::new(scanned.tokens).parse();
        assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
        compile(&statements)
    }

    fn ops(chunk: &Chunk) -> Vec<u8> {
        chunk.code.clone()
    }

    const C: u8 = OpCode::Constant as u8;

    #[test]
    fn test_print_addition() {
        let chunk = compile_source("print 1 + 2").unwrap();
        assert_eq!(
            ops(&chunk),
            vec![
                C,
                0,
                C,
                1,
                OpCode::Add as u8,
                OpCode::Print as u8,
                OpCode::Return as u8,
            ]
        );
        assert_eq!(chunk.constants, vec![Value::Number(1.0), Value::Number(2.0)]);
    }

    #[test]
    fn test_expression_statement_pops_its_value() {
        let chunk = compile_source("1 + 2").unwrap();
        assert_eq!(*chunk.code.last().unwrap(), OpCode::Return as u8);
        assert_eq!(chunk.code[chunk.code.len() - 2], OpCode::Pop as u8);
    }

    #[test]
    fn test_derived_comparisons() {
        let chunk = compile_source("1 != 2").unwrap();
        assert!(ops(&chunk)
            .windows(2)
            .any(|w| w == [OpCode::Equals as u8, OpCode::Not as u8]));

        let chunk = compile_source("1 >= 2").unwrap();
        assert!(ops(&chunk)
            .windows(2)
            .any(|w| w == [OpCode::Less as u8, OpCode::Not as u8]));

        let chunk = compile_source("1 <= 2").unwrap();
        assert!(ops(&chunk)
            .windows(2)
            .any(|w| w == [OpCode::Greater as u8, OpCode::Not as u8]));
    }

    #[test]
    fn test_grouping_emits_no_extra_code() {
        let grouped = compile_source("print (1 + 2)").unwrap();
        let plain = compile_source("print 1 + 2").unwrap();
        assert_eq!(grouped.code, plain.code);
    }

    #[test]
    fn test_repeated_literal_shares_a_constant() {
        let chunk = compile_source("print 5 + 5").unwrap();
        assert_eq!(chunk.constants, vec![Value::Number(5.0)]);
    }

    #[test]
    fn test_pass_emits_nothing() {
        let chunk = compile_source("pass").unwrap();
        assert_eq!(ops(&chunk), vec![OpCode::Return as u8]);
    }

    #[test]
    fn test_variable_reference_is_rejected() {
        let errors = compile_source("print speed").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Variables are not supported yet: 'speed'"
        );
    }

    #[test]
    fn test_unsupported_statements_accumulate() {
        let errors = compile_source("break\ncontinue\nprint 1\nreturn 2\n").unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].line(), 1);
        assert_eq!(errors[1].line(), 2);
        assert_eq!(errors[2].line(), 4);
    }

    #[test]
    fn test_class_and_task_are_rejected() {
        let errors = compile_source("class Robot\n    pass\n").unwrap_err();
        assert!(matches!(
            errors[0],
            CompileError::Unsupported {
                construct: "Class declarations",
                ..
            }
        ));

        let errors = compile_source("task go()\n    pass\n").unwrap_err();
        assert!(matches!(
            errors[0],
            CompileError::Unsupported {
                construct: "Task declarations",
                ..
            }
        ));
    }

    #[test]
    fn test_logical_expression_is_rejected() {
        let errors = compile_source("print true and false").unwrap_err();
        assert!(matches!(
            errors[0],
            CompileError::Unsupported {
                construct: "Logical expressions",
                ..
            }
        ));
    }

    #[test]
    fn test_constant_pool_overflow_is_a_compile_error() {
        let mut source = String::new();
        for i in 0..300 {
            source.push_str(&format!("print {i}\n"));
        }
        let errors = compile_source(&source).unwrap_err();
        assert!(errors
            .iter()
            .all(|e| matches!(e, CompileError::TooManyConstants(_))));
        assert_eq!(errors.len(), 300 - 256);
    }
}
