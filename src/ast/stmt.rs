//! Statement AST nodes.

use crate::ast::expr::Expr;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Self { kind, line }
    }
}

/// Statement variants. Every block is a plain sequence of statements;
/// empty blocks are legal.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Expression statement: expr
    Expression(Expr),

    /// Print statement: print expr
    Print(Expr),

    /// Assignment: name = expr
    Assignment { name: String, value: Expr },

    /// If statement with optional else block
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },

    /// While loop
    While { condition: Expr, body: Vec<Stmt> },

    /// C-style for loop: for init; cond; incr
    For {
        initializer: Expr,
        condition: Expr,
        increment: Expr,
        body: Vec<Stmt>,
    },

    /// Return statement with optional value
    Return(Option<Expr>),

    /// No-op statement
    Pass,

    /// Break out of the enclosing loop
    Break,

    /// Continue the enclosing loop
    Continue,

    /// Class declaration: a name and its method declarations
    Class { name: String, methods: Vec<Stmt> },

    /// Task declaration: name, typed parameters, return type, body
    Task {
        name: String,
        params: Vec<Parameter>,
        return_type: String,
        body: Vec<Stmt>,
    },
}

/// A typed task parameter: `name: type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}
