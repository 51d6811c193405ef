use crate::error::{ArborError, Result};
use crate::span::Span;
use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// A pull lexer over expression source text.
///
/// Recognized input: decimal integer literals, whitespace, and the
/// single-character tokens `+ - * / ( )`. Literals are lexed into `i64`;
/// anything larger is a lexical error. Any other character is a lexical
/// error carrying the character and its byte offset.
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    /// Byte length of the input, used as the offset of `Eof` tokens.
    len: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.char_indices().peekable(),
            len: input.len(),
        }
    }

    /// Return the next token, advancing the cursor.
    ///
    /// Once the input is exhausted this returns `Eof` and keeps returning
    /// `Eof` on every later call.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let Some(&(offset, ch)) = self.chars.peek() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(self.len)));
        };

        let kind = match ch {
            '0'..='9' => return self.read_number(),
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => {
                return Err(ArborError::UnrecognizedChar {
                    ch,
                    span: Span::new(offset, ch.len_utf8()).into(),
                })
            }
        };
        self.chars.next();
        Ok(Token::new(kind, Span::new(offset, ch.len_utf8())))
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token> {
        let mut literal = String::new();
        let mut start = self.len;

        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() {
                if literal.is_empty() {
                    start = offset;
                }
                literal.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }

        let span = Span::new(start, literal.len());
        match literal.parse::<i64>() {
            Ok(n) => Ok(Token::new(TokenKind::Number(n), span)),
            Err(_) => Err(ArborError::IntOutOfRange { span: span.into() }),
        }
    }
}
