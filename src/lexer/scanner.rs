//! Scanner for Langlang source code.
//!
//! The scanner is line-aware: in addition to ordinary tokens it emits a
//! `Newline` token for every line break and `Indent`/`Dedent` tokens at line
//! starts, driven by a stack of indentation widths. Scanning never fails;
//! lexical faults are collected as diagnostics and the scan continues.

use crate::error::LexError;
use crate::lexer::token::{Token, TokenKind};

/// Columns one tab stop advances.
const TAB_WIDTH: usize = 4;

/// The result of scanning a source text: a best-effort token stream plus any
/// lexical diagnostics. The token stream always ends with `Eof`.
#[derive(Debug)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexError>,
}

/// The scanner transforms source text into a stream of tokens.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    start_pos: usize,
    line: u32,
    start_line: u32,
    at_line_start: bool,
    indent_stack: Vec<usize>,
    tokens: Vec<Token>,
    diagnostics: Vec<LexError>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            start_pos: 0,
            line: 1,
            start_line: 1,
            at_line_start: true,
            indent_stack: vec![0],
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan all tokens from the source.
    pub fn scan_tokens(mut self) -> ScanResult {
        loop {
            if self.at_line_start {
                self.handle_indentation();
            }
            self.mark_start();
            let Some(c) = self.advance() else {
                break;
            };
            self.scan_token(c);
        }

        // Close any indentation still open at end of input so the
        // Indent/Dedent counts always balance.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens
                .push(Token::new(TokenKind::Dedent, "", self.line));
        }
        self.tokens.push(Token::eof(self.line));

        ScanResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Measure the leading whitespace of the current line and emit
    /// Indent/Dedent tokens against the indentation stack.
    fn handle_indentation(&mut self) {
        self.at_line_start = false;

        let mut width = 0;
        loop {
            match self.peek() {
                Some(' ') => {
                    width += 1;
                    self.advance();
                }
                Some('\t') => {
                    width += TAB_WIDTH;
                    self.advance();
                }
                _ => break,
            }
        }

        // Blank and comment-only lines carry no indentation information.
        match self.peek() {
            None | Some('\n') | Some('\r') => return,
            Some('/') if matches!(self.peek_next(), Some('/') | Some('*')) => return,
            _ => {}
        }

        let top = *self.indent_stack.last().unwrap_or(&0);
        if width > top {
            self.indent_stack.push(width);
            self.tokens
                .push(Token::new(TokenKind::Indent, "", self.line));
        } else if width < top {
            while width < *self.indent_stack.last().unwrap_or(&0) {
                self.indent_stack.pop();
                self.tokens
                    .push(Token::new(TokenKind::Dedent, "", self.line));
            }
            if width != *self.indent_stack.last().unwrap_or(&0) {
                self.diagnostics
                    .push(LexError::InconsistentIndentation(self.line));
            }
        }
    }

    fn scan_token(&mut self, c: char) {
        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            '[' => self.add_token(TokenKind::LeftBracket),
            ']' => self.add_token(TokenKind::RightBracket),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            ':' => self.add_token(TokenKind::Colon),
            ';' => self.add_token(TokenKind::Semicolon),

            '+' => self.add_token(TokenKind::Plus),
            '-' => self.add_token(TokenKind::Minus),
            '*' => self.add_token(TokenKind::Star),
            '/' => {
                if self.match_char('/') {
                    self.line_comment();
                } else if self.match_char('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            '=' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::EqualEqual);
                } else {
                    self.add_token(TokenKind::Equal);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::BangEqual);
                } else {
                    self.add_token(TokenKind::Bang);
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::LessEqual);
                } else {
                    self.add_token(TokenKind::Less);
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::GreaterEqual);
                } else {
                    self.add_token(TokenKind::Greater);
                }
            }

            ' ' | '\r' | '\t' => {}

            '\n' => {
                self.add_token(TokenKind::Newline);
                self.line += 1;
                self.at_line_start = true;
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => self.diagnostics.push(LexError::UnexpectedChar(c, self.line)),
        }
    }

    fn line_comment(&mut self) {
        while self.peek().is_some() && self.peek() != Some('\n') {
            self.advance();
        }
    }

    /// Skip a `/* ... */` comment. An unterminated comment runs to end of
    /// input, which is not an error.
    fn block_comment(&mut self) {
        loop {
            match self.peek() {
                None => break,
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a string literal. Strings may span lines and carry no escape
    /// sequences; the lexeme keeps its surrounding quotes.
    fn string(&mut self) {
        loop {
            match self.peek() {
                None => {
                    self.diagnostics
                        .push(LexError::UnterminatedString(self.start_line));
                    return;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        self.add_token(TokenKind::Str);
    }

    fn number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.add_token(TokenKind::Number);
    }

    fn identifier(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let text = &self.source[self.start_pos..self.current_pos];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next()?;
        iter.next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn mark_start(&mut self) {
        self.start_pos = self.current_pos;
        self.start_line = self.line;
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = &self.source[self.start_pos..self.current_pos];
        self.tokens.push(Token::new(kind, lexeme, self.start_line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<TokenKind> {
        let result = Scanner::new(source).scan_tokens();
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        result.tokens.into_iter().map(|t| t.kind).collect()
    }

    fn scan_with_errors(source: &str) -> (Vec<Token>, Vec<LexError>) {
        let result = Scanner::new(source).scan_tokens();
        (result.tokens, result.diagnostics)
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            scan("(){}"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            scan("+ - * / == != <= >= < > = !"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Equal,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            scan("task class if while pass"),
            vec![
                TokenKind::Task,
                TokenKind::Class,
                TokenKind::If,
                TokenKind::While,
                TokenKind::Pass,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_not_keyword() {
        let result = Scanner::new("taskforce").scan_tokens();
        assert_eq!(result.tokens[0].kind, TokenKind::Identifier);
        assert_eq!(result.tokens[0].lexeme, "taskforce");
    }

    #[test]
    fn test_identifiers_are_ascii_only() {
        let (tokens, errors) = scan_with_errors("café");
        // The identifier stops before the non-ASCII letter
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "caf");
        assert_eq!(errors, vec![LexError::UnexpectedChar('é', 1)]);
    }

    #[test]
    fn test_numbers() {
        let result = Scanner::new("42 3.14 7.").scan_tokens();
        let lexemes: Vec<&str> = result
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.lexeme.as_str())
            .collect();
        // "7." scans as the number 7 followed by a dot
        assert_eq!(lexemes, vec!["42", "3.14", "7"]);
    }

    #[test]
    fn test_string_keeps_quotes() {
        let result = Scanner::new(r#""hello""#).scan_tokens();
        assert_eq!(result.tokens[0].kind, TokenKind::Str);
        assert_eq!(result.tokens[0].lexeme, "\"hello\"");
    }

    #[test]
    fn test_multiline_string_counts_lines() {
        let result = Scanner::new("\"a\nb\" x").scan_tokens();
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.tokens[0].kind, TokenKind::Str);
        assert_eq!(result.tokens[0].line, 1);
        let ident = result
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::Identifier)
            .unwrap();
        assert_eq!(ident.line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let (_, errors) = scan_with_errors("\"oops");
        assert_eq!(errors, vec![LexError::UnterminatedString(1)]);
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, errors) = scan_with_errors("1 @ 2");
        assert_eq!(errors, vec![LexError::UnexpectedChar('@', 1)]);
        // Scanning continues past the bad character
        let numbers = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .count();
        assert_eq!(numbers, 2);
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            scan("1 // comment\n2"),
            vec![
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(
            scan("1 /* a\nb */ 2"),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_block_comment_is_not_fatal() {
        let (tokens, errors) = scan_with_errors("1 /* never closed");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Number);
    }

    #[test]
    fn test_newline_token() {
        assert_eq!(
            scan("1\n2"),
            vec![
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_indent_dedent() {
        assert_eq!(
            scan("a\n    b\nc"),
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_nested_indentation_balances() {
        let kinds = scan("a\n  b\n    c\nd");
        let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, 2);
        assert_eq!(dedents, 2);
    }

    #[test]
    fn test_dedents_emitted_at_eof() {
        let kinds = scan("a\n  b\n    c");
        let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, dedents);
        assert_eq!(*kinds.last().unwrap(), TokenKind::Eof);
    }

    #[test]
    fn test_blank_lines_do_not_affect_indentation() {
        assert_eq!(
            scan("a\n\n    \nb"),
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comment_only_lines_do_not_affect_indentation() {
        assert_eq!(
            scan("print 1\n    // note\nprint 2\n"),
            vec![
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
        // An indented block comment on its own line is just as inert
        assert_eq!(
            scan("print 1\n    /* note */\nprint 2\n"),
            vec![
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Print,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_inconsistent_indentation() {
        // 4 then back to 2, which matches no open width
        let (_, errors) = scan_with_errors("a\n    b\n  c\n");
        assert_eq!(errors, vec![LexError::InconsistentIndentation(3)]);
    }

    #[test]
    fn test_tab_counts_as_four() {
        assert_eq!(
            scan("a\n\tb\nc"),
            vec![
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }
}
