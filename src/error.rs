use crate::span::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArborError>;

#[derive(Error, Debug, Diagnostic)]
pub enum ArborError {
    #[error("Lex Error: unrecognized character '{ch}'")]
    #[diagnostic(code(arbor::lexer::unrecognized_char))]
    UnrecognizedChar {
        ch: char,
        #[label("this character")]
        span: SourceSpan,
    },

    #[error("Lex Error: integer literal out of range")]
    #[diagnostic(
        code(arbor::lexer::int_out_of_range),
        help("number literals must fit in a 64-bit signed integer")
    )]
    IntOutOfRange {
        #[label("this literal")]
        span: SourceSpan,
    },

    #[error("Syntax Error: expected {expected}, found {found}")]
    #[diagnostic(code(arbor::parser::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Runtime Error: name '{name}' is not defined")]
    #[diagnostic(code(arbor::interpreter::undefined_name))]
    UndefinedName { name: String },

    /// An operator string outside its node kind's allowed set reached the
    /// evaluator. Unreachable for parser-produced, validator-approved trees.
    #[error("Runtime Error: invalid operator '{op}'")]
    #[diagnostic(code(arbor::interpreter::invalid_operator))]
    InvalidOperator { op: String },

    #[error("Runtime Error: {message}")]
    #[diagnostic(code(arbor::interpreter::error))]
    Runtime { message: String },

    #[error("Decode Error: unknown node tag '{tag}'")]
    #[diagnostic(code(arbor::codec::unknown_tag))]
    UnknownTag { tag: String },

    #[error("Decode Error: {message}")]
    #[diagnostic(code(arbor::codec::malformed))]
    Decode { message: String },
}

impl ArborError {
    pub fn unexpected_token(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ArborError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span: span.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        ArborError::Runtime {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ArborError::Decode {
            message: message.into(),
        }
    }
}
