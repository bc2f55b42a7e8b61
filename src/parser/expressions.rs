//! Expression parsing via iterative precedence climbing.
//!
//! Levels from lowest to highest: or, and, equality, comparison, term,
//! factor, unary, primary. Every binary level is left-associative.

use crate::ast::{BinaryOp, Expr, ExprKind, LiteralValue, LogicalOp, UnaryOp};
use crate::error::ParseError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.logical_and()?;
        while self.match_token(TokenKind::Or) {
            let line = self.previous().line;
            let right = self.logical_and()?;
            expr = Expr::new(
                ExprKind::Logical {
                    left: Box::new(expr),
                    op: LogicalOp::Or,
                    right: Box::new(right),
                },
                line,
            );
        }
        Ok(expr)
    }

    fn logical_and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;
        while self.match_token(TokenKind::And) {
            let line = self.previous().line;
            let right = self.equality()?;
            expr = Expr::new(
                ExprKind::Logical {
                    left: Box::new(expr),
                    op: LogicalOp::And,
                    right: Box::new(right),
                },
                line,
            );
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;
        loop {
            let op = if self.match_token(TokenKind::EqualEqual) {
                BinaryOp::Equal
            } else if self.match_token(TokenKind::BangEqual) {
                BinaryOp::NotEqual
            } else {
                break;
            };
            let line = self.previous().line;
            let right = self.comparison()?;
            expr = self.binary(expr, op, right, line);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;
        loop {
            let op = if self.match_token(TokenKind::Less) {
                BinaryOp::Less
            } else if self.match_token(TokenKind::LessEqual) {
                BinaryOp::LessEqual
            } else if self.match_token(TokenKind::Greater) {
                BinaryOp::Greater
            } else if self.match_token(TokenKind::GreaterEqual) {
                BinaryOp::GreaterEqual
            } else {
                break;
            };
            let line = self.previous().line;
            let right = self.term()?;
            expr = self.binary(expr, op, right, line);
        }
        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;
        loop {
            let op = if self.match_token(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.match_token(TokenKind::Minus) {
                BinaryOp::Subtract
            } else {
                break;
            };
            let line = self.previous().line;
            let right = self.factor()?;
            expr = self.binary(expr, op, right, line);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;
        loop {
            let op = if self.match_token(TokenKind::Star) {
                BinaryOp::Multiply
            } else if self.match_token(TokenKind::Slash) {
                BinaryOp::Divide
            } else {
                break;
            };
            let line = self.previous().line;
            let right = self.unary()?;
            expr = self.binary(expr, op, right, line);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        let op = if self.match_token(TokenKind::Bang) {
            UnaryOp::Not
        } else if self.match_token(TokenKind::Minus) {
            UnaryOp::Negate
        } else {
            return self.primary();
        };
        let line = self.previous().line;
        let operand = self.unary()?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            line,
        ))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let line = self.peek().line;

        if self.match_token(TokenKind::True) {
            return Ok(Expr::new(ExprKind::Literal(LiteralValue::Bool(true)), line));
        }
        if self.match_token(TokenKind::False) {
            return Ok(Expr::new(
                ExprKind::Literal(LiteralValue::Bool(false)),
                line,
            ));
        }
        if self.match_token(TokenKind::Null) {
            return Ok(Expr::new(ExprKind::Literal(LiteralValue::Null), line));
        }
        if self.match_token(TokenKind::Number) {
            let lexeme = &self.previous().lexeme;
            let value = lexeme
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber {
                    lexeme: lexeme.clone(),
                    line,
                })?;
            return Ok(Expr::new(
                ExprKind::Literal(LiteralValue::Number(value)),
                line,
            ));
        }
        if self.match_token(TokenKind::Str) {
            // The lexeme still carries its surrounding quotes.
            let lexeme = &self.previous().lexeme;
            let text = lexeme[1..lexeme.len() - 1].to_string();
            return Ok(Expr::new(ExprKind::Literal(LiteralValue::Str(text)), line));
        }
        if self.match_token(TokenKind::Identifier) {
            let name = self.previous().lexeme.clone();
            return Ok(Expr::new(ExprKind::Variable(name), line));
        }
        if self.match_token(TokenKind::LeftParen) {
            let expr = self.expression()?;
            self.expect(TokenKind::RightParen, "')' after expression")?;
            return Ok(Expr::new(ExprKind::Grouping(Box::new(expr)), line));
        }

        Err(ParseError::ExpectedExpression {
            found: self.found_description(),
            line,
        })
    }

    fn binary(&self, left: Expr, op: BinaryOp, right: Expr, line: u32) -> Expr {
        Expr::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            line,
        )
    }
}
