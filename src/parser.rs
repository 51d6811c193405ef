//! Pratt (binding-power) expression parser.
//!
//! Precedence climbing with a fixed, left-associative table:
//!
//! | operator | left bp | right bp |
//! |----------|---------|----------|
//! | `+` `-`  | 3       | 4        |
//! | `*` `/`  | 5       | 6        |
//!
//! `rbp = lbp + 1` encodes left associativity: the cutoff in
//! [`Parser::parse_expr`] is strict (`lbp < min_bp`), so an equal-precedence
//! operator to the right does not extend the right operand and chains fold
//! left (`8 - 3 - 2` parses as `(8 - 3) - 2`).

use crate::ast::{Expr, Number};
use crate::error::{ArborError, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Minimum binding power for the operand of a prefix `-`. Higher than every
/// binary operator, so unary minus binds tighter than any of them, while a
/// parenthesized group still resets the minimum to 0.
const UNARY_BP: u8 = 7;

/// Parse a complete expression, requiring the whole input to be consumed.
pub fn parse(source: &str) -> Result<Expr> {
    Parser::new(Lexer::new(source))?.parse()
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    /// Parse one expression followed by end of input.
    pub fn parse(mut self) -> Result<Expr> {
        let expr = self.parse_expr(0)?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    /// Parse an expression whose operators all bind at least as tightly as
    /// `min_bp`.
    fn parse_expr(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_primary()?;

        loop {
            let Some((op, l_bp, r_bp)) = binding_power(self.current.kind) else {
                break;
            };
            if l_bp < min_bp {
                // Precedence cutoff: leave the operator for an outer call.
                break;
            }

            self.advance()?;
            let rhs = self.parse_expr(r_bp)?;
            lhs = Expr::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    /// Parse a primary: a number literal, a parenthesized expression, or a
    /// prefix `-`.
    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current.kind {
            TokenKind::Number(n) => {
                self.advance()?;
                Ok(Expr::Num(Number::Int(n)))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Minus => {
                self.advance()?;
                let operand = self.parse_expr(UNARY_BP)?;
                Ok(Expr::unary("-", operand))
            }
            found => Err(ArborError::unexpected_token(
                "a number, '(' or unary '-'",
                found.to_string(),
                self.current.span,
            )),
        }
    }

    /// Consume the current token if it has the expected kind, error with
    /// expected vs. actual otherwise.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(ArborError::unexpected_token(
                kind.to_string(),
                self.current.kind.to_string(),
                self.current.span,
            ))
        }
    }

    /// Pull the next token from the lexer, returning the one it replaces.
    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }
}

/// The binding-power table. Returns `(op, lbp, rbp)` for binary operator
/// tokens, `None` for anything else.
fn binding_power(kind: TokenKind) -> Option<(&'static str, u8, u8)> {
    match kind {
        TokenKind::Plus => Some(("+", 3, 4)),
        TokenKind::Minus => Some(("-", 3, 4)),
        TokenKind::Star => Some(("*", 5, 6)),
        TokenKind::Slash => Some(("/", 5, 6)),
        _ => None,
    }
}
