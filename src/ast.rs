//! The AST node model.
//!
//! `Expr`, `Stmt`, and `Module` are closed sum types: the evaluator,
//! validator, and codec all match on them exhaustively, so adding a node
//! kind without updating every consumer fails to compile.
//!
//! Operator fields are strings checked against the allowlist constants
//! below. The validator's contract is to *report* an out-of-set operator
//! (not to make one unrepresentable), and the evaluator treats one as an
//! internal-consistency failure, so the operator must be able to hold an
//! illegal value on a hand-built or decoded tree.

/// A numeric literal value, integral or real.
///
/// Integer-integer arithmetic stays integral except `/`, which always
/// produces a real quotient; any operation touching a `Float` promotes.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Allowed operators for `Expr::Unary`.
pub const UNARY_OPS: &[&str] = &["-", "+", "not"];
/// Allowed operators for `Expr::Binary`.
pub const BINARY_OPS: &[&str] = &["+", "-", "*", "/", "//", "%", "**"];
/// Allowed operators for `Expr::Compare`.
pub const COMPARE_OPS: &[&str] = &["<", ">", "==", "!=", "<=", ">="];
/// Allowed operators for `Expr::BoolOp`.
pub const BOOL_OPS: &[&str] = &["and", "or"];

/// An expression node. Evaluating one yields a value and never mutates the
/// environment.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    /// A numeric literal.
    Num(Number),
    /// A variable reference, resolved against the environment. The
    /// identifier must be non-empty.
    Name(String),
    /// A unary operation; `op` must be one of [`UNARY_OPS`].
    Unary { op: String, operand: Box<Expr> },
    /// An arithmetic binary operation; `op` must be one of [`BINARY_OPS`].
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    /// A comparison; `op` must be one of [`COMPARE_OPS`]. Always evaluates
    /// to a boolean.
    Compare {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    /// A short-circuiting boolean operation; `op` must be one of
    /// [`BOOL_OPS`]. Evaluates to the deciding operand's value.
    BoolOp {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// A statement node. Executing one produces side effects (environment
/// bindings, output) and no value.
///
/// No parser production currently builds statements from source text; they
/// are constructed programmatically against this model.
#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    /// Bind `target` (non-empty) to the value of `value`.
    Assign { target: String, value: Expr },
    /// Evaluate the argument and emit it through the interpreter's output
    /// sink.
    Print(Expr),
    /// Execute `body` if `test` is truthy, `orelse` otherwise. `orelse` may
    /// be empty.
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    /// Iterate the half-open integer range `[start, stop)`, binding
    /// `target` (non-empty) each iteration. Bounds are evaluated once.
    ForRange {
        target: String,
        start: Expr,
        stop: Expr,
        body: Vec<Stmt>,
    },
}

/// A top-level program: an ordered sequence of statements evaluated against
/// a fresh environment.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Module { body }
    }
}

impl Expr {
    /// Convenience constructor for boxed binary nodes.
    pub fn binary(left: Expr, op: impl Into<String>, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    /// Convenience constructor for boxed unary nodes.
    pub fn unary(op: impl Into<String>, operand: Expr) -> Self {
        Expr::Unary {
            op: op.into(),
            operand: Box::new(operand),
        }
    }
}
