//! # arbor
//!
//! A small expression-language front end:
//!
//!   source text ──► Lexer ──► Tokens ──► Parser ──► AST
//!                                                    │
//!                          ┌─────────────────────────┼────────────────┐
//!                          ▼                         ▼                ▼
//!                     Interpreter                Validator          Codec
//!                 (value + env effects)     (violations as data)  (AST ⇄ JSON)
//!
//! The parser is a Pratt (binding-power) parser over the expression grammar
//! `+ - * /`, parentheses, and unary minus. The AST additionally models
//! statement forms (`Assign`, `Print`, `If`, `ForRange`, `Module`) which
//! the interpreter executes and the validator checks; no surface syntax
//! builds them — they are constructed programmatically or arrive through
//! the raw validation path.
//!
//! ```
//! use arbor::object::Object;
//!
//! let value = arbor::eval("3 + 5 * 2").unwrap();
//! assert_eq!(value, Object::Integer(13));
//! ```

pub mod ast;
pub mod codec;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod span;
pub mod token;
pub mod validate;

pub use ast::{Expr, Module, Number, Stmt};
pub use codec::{from_obj, to_obj};
pub use environment::Environment;
pub use error::{ArborError, Result};
pub use interpreter::Interpreter;
pub use object::Object;
pub use parser::parse;
pub use validate::{validate_expr, validate_module, validate_obj, validate_statement, Violation};

/// Parse and evaluate an expression against an empty environment.
pub fn eval(source: &str) -> Result<Object> {
    let expr = parser::parse(source)?;
    let env = Environment::new();
    Interpreter::new().eval_expression(&expr, &env)
}
