//! Abstract syntax tree for Langlang.
//!
//! Nodes are closed enums owned by value: each node is owned exclusively by
//! its parent, forming a tree with no sharing and no cycles. The tree is
//! immutable once the parser returns it.

pub mod expr;
pub mod stmt;

pub use expr::{BinaryOp, Expr, ExprKind, LiteralValue, LogicalOp, UnaryOp};
pub use stmt::{Parameter, Stmt, StmtKind};
