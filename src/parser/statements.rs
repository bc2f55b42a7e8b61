//! Statement and declaration parsing, including the dual block styles.

use crate::ast::{Parameter, Stmt, StmtKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn declaration(&mut self) -> ParseResult<Stmt> {
        if self.check(TokenKind::Class) {
            self.class_declaration()
        } else if self.check(TokenKind::Task) {
            self.task_declaration()
        } else if self.check(TokenKind::If) {
            self.if_statement()
        } else if self.check(TokenKind::While) {
            self.while_statement()
        } else if self.check(TokenKind::For) {
            self.for_statement()
        } else if self.check(TokenKind::Return) {
            self.return_statement()
        } else if self.check(TokenKind::Pass) {
            self.simple_statement(StmtKind::Pass)
        } else if self.check(TokenKind::Break) {
            self.simple_statement(StmtKind::Break)
        } else if self.check(TokenKind::Continue) {
            self.simple_statement(StmtKind::Continue)
        } else if self.check(TokenKind::Print) {
            self.print_statement()
        } else {
            self.statement()
        }
    }

    /// An identifier immediately followed by `=` is an assignment; anything
    /// else falls through to an expression statement.
    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.check(TokenKind::Identifier) && self.peek_nth(1).kind == TokenKind::Equal {
            return self.assignment_statement();
        }
        self.expression_statement()
    }

    fn assignment_statement(&mut self) -> ParseResult<Stmt> {
        let name_token = self.expect(TokenKind::Identifier, "variable name")?;
        let line = name_token.line;
        self.expect(TokenKind::Equal, "'=' after variable name")?;
        let value = self.expression()?;
        self.consume_statement_end()?;
        Ok(Stmt::new(
            StmtKind::Assignment {
                name: name_token.lexeme,
                value,
            },
            line,
        ))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        let line = expr.line;
        self.consume_statement_end()?;
        Ok(Stmt::new(StmtKind::Expression(expr), line))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let expr = self.expression()?;
        self.consume_statement_end()?;
        Ok(Stmt::new(StmtKind::Print(expr), line))
    }

    fn simple_statement(&mut self, kind: StmtKind) -> ParseResult<Stmt> {
        let line = self.advance().line;
        self.consume_statement_end()?;
        Ok(Stmt::new(kind, line))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume_statement_end()?;
        Ok(Stmt::new(StmtKind::Return(value), line))
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let condition = self.expression()?;
        let then_branch = self.block("if condition")?;

        let else_branch = if self.match_token(TokenKind::Else) {
            self.block("else")?
        } else {
            Vec::new()
        };

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            line,
        ))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let condition = self.expression()?;
        let body = self.block("while condition")?;
        Ok(Stmt::new(StmtKind::While { condition, body }, line))
    }

    fn for_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let initializer = self.expression()?;
        self.expect(TokenKind::Semicolon, "';' after for initializer")?;
        let condition = self.expression()?;
        self.expect(TokenKind::Semicolon, "';' after for condition")?;
        let increment = self.expression()?;
        let body = self.block("for header")?;
        Ok(Stmt::new(
            StmtKind::For {
                initializer,
                condition,
                increment,
                body,
            },
            line,
        ))
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let name = self.expect_identifier("class name")?;
        let methods = self.block("class name")?;
        Ok(Stmt::new(StmtKind::Class { name, methods }, line))
    }

    fn task_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line;
        let name = self.expect_identifier("task name")?;
        self.expect(TokenKind::LeftParen, "'(' after task name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let param_name = self.expect_identifier("parameter name")?;
                self.expect(TokenKind::Colon, "':' after parameter name")?;
                let type_name = self.expect_identifier("parameter type")?;
                params.push(Parameter {
                    name: param_name,
                    type_name,
                });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "')' after parameters")?;

        let return_type = if self.match_token(TokenKind::Colon) {
            self.expect_identifier("return type")?
        } else {
            "void".to_string()
        };

        let body = self.block("task signature")?;
        Ok(Stmt::new(
            StmtKind::Task {
                name,
                params,
                return_type,
                body,
            },
            line,
        ))
    }

    /// Parse a block in either delimiter style: `{ ... }`, or a newline
    /// followed by `Indent ... Dedent`. The two styles are never mixed
    /// within one block; which one applies is decided by the token that
    /// follows the construct header.
    pub(crate) fn block(&mut self, context: &str) -> ParseResult<Vec<Stmt>> {
        if self.match_token(TokenKind::LeftBrace) {
            self.brace_block()
        } else if self.match_token(TokenKind::Newline) {
            self.indented_block()
        } else {
            Err(ParseError::ExpectedBlock {
                context: context.to_string(),
                line: self.peek().line,
            })
        }
    }

    fn brace_block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        loop {
            self.skip_layout();
            if self.check(TokenKind::RightBrace) || self.is_at_end() {
                break;
            }
            statements.push(self.declaration()?);
        }
        self.expect(TokenKind::RightBrace, "'}' after block")?;
        Ok(statements)
    }

    fn indented_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.skip_newlines();
        self.expect(TokenKind::Indent, "an indented block")?;
        let mut statements = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenKind::Dedent) || self.is_at_end() {
                break;
            }
            statements.push(self.declaration()?);
        }
        self.expect(TokenKind::Dedent, "dedent after block")?;
        Ok(statements)
    }

    /// Inside a brace block the source may still be indented, so layout
    /// tokens between statements carry no meaning there.
    fn skip_layout(&mut self) {
        while matches!(
            self.peek().kind,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent
        ) {
            self.advance();
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::Eof
                | TokenKind::RightBrace
                | TokenKind::Dedent
        )
    }

    /// A statement ends with an optional `;`; otherwise a newline, end of
    /// input, or the closing token of the enclosing block must follow.
    fn consume_statement_end(&mut self) -> ParseResult<()> {
        if self.match_token(TokenKind::Semicolon) {
            return Ok(());
        }
        if self.match_token(TokenKind::Newline) {
            return Ok(());
        }
        if self.check(TokenKind::Eof)
            || self.check(TokenKind::RightBrace)
            || self.check(TokenKind::Dedent)
        {
            return Ok(());
        }
        Err(ParseError::ExpectedStatementEnd(self.peek().line))
    }
}
