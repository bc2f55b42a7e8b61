//! Core parser struct, helper methods, and error recovery.

use crate::ast::Stmt;
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

pub type ParseResult<T> = Result<T, ParseError>;

/// The recursive-descent parser for Langlang.
///
/// Parsing is best-effort: a structural failure inside one statement records
/// a diagnostic and synchronizes to the next statement boundary, so a single
/// pass can surface several independent errors. The returned statement list
/// is a valid-prefix reconstruction; callers must treat any diagnostic as a
/// compilation failure.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    pub(crate) errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Parse a complete program: a sequence of top-level declarations.
    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }

        (statements, self.errors)
    }

    /// Discard tokens up to the next statement boundary: just past a newline,
    /// or in front of a token that opens a new declaration.
    pub(crate) fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.peek().kind == TokenKind::Newline {
                self.advance();
                return;
            }
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    // ===== Token manipulation =====

    pub(crate) fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current - 1].clone()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        let index = (self.current + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(crate) fn expect_identifier(&mut self, expected: &str) -> ParseResult<String> {
        let token = self.expect(TokenKind::Identifier, expected)?;
        Ok(token.lexeme)
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.found_description(),
            line: self.peek().line,
        }
    }

    /// Describe the current token for diagnostics: its lexeme when it has
    /// one, its kind name for layout tokens and end of file.
    pub(crate) fn found_description(&self) -> String {
        let token = self.peek();
        if token.lexeme.is_empty() || token.lexeme == "\n" {
            token.kind.to_string()
        } else {
            token.lexeme.clone()
        }
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.match_token(TokenKind::Newline) {}
    }
}
