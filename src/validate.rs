//! Structural validation — cheap, local invariant checks over a tree.
//!
//! Validation is pure: it never evaluates the tree and never fails — every
//! finding is returned as a [`Violation`], and an empty result means the
//! tree is well-formed. All findings are collected; nothing short-circuits.
//!
//! Two inputs are validated, sharing codes, operator allowlists, and path
//! rendering:
//!
//!   1. Typed AST nodes ([`validate_expr`], [`validate_statement`],
//!      [`validate_module`]) — checks the invariants the type system cannot
//!      enforce: operator strings against their allowlists and non-empty
//!      identifiers.
//!   2. The raw tagged form ([`validate_obj`]) — the neutral JSON shape a
//!      parser-free path feeds back in, where missing children
//!      (`NONE_NODE`), non-numeric literals (`NUM_TYPE`), malformed bodies
//!      (`IF_BODY`, ...), and unknown tags (`UNKNOWN_NODE`) are
//!      representable. The raw walker recognizes statement tags even though
//!      the codec only emits expressions.

use crate::ast::{Expr, Module, Stmt, BINARY_OPS, BOOL_OPS, COMPARE_OPS, UNARY_OPS};
use serde_json::Value;
use std::fmt;

/// A single structural-invariant failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Short stable code, e.g. `BIN_OP`, `NONE_NODE`.
    pub code: &'static str,
    /// Rendered tree path, e.g. `root.left.right` or `root.body[2]`.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.path, self.message)
    }
}

/// One step in a tree path. Paths are built structurally and rendered to
/// the dotted/indexed string form only when a violation is recorded.
#[derive(Clone, Copy)]
enum PathStep {
    Field(&'static str),
    Item(&'static str, usize),
}

struct Path<'a> {
    steps: &'a [PathStep],
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for step in self.steps {
            match step {
                PathStep::Field(name) => write!(f, ".{name}")?,
                PathStep::Item(name, i) => write!(f, ".{name}[{i}]")?,
            }
        }
        Ok(())
    }
}

/// Walker state: the path cursor and the violations collected so far.
struct Checker {
    steps: Vec<PathStep>,
    out: Vec<Violation>,
}

impl Checker {
    fn new() -> Self {
        Checker {
            steps: Vec::new(),
            out: Vec::new(),
        }
    }

    fn report(&mut self, code: &'static str, message: String) {
        self.out.push(Violation {
            code,
            path: Path { steps: &self.steps }.to_string(),
            message,
        });
    }

    /// Report against a field of the current node (e.g. `.op`) without
    /// descending into it.
    fn report_field(&mut self, code: &'static str, field: &'static str, message: String) {
        self.steps.push(PathStep::Field(field));
        self.report(code, message);
        self.steps.pop();
    }

    fn enter(&mut self, step: PathStep, walk: impl FnOnce(&mut Self)) {
        self.steps.push(step);
        walk(self);
        self.steps.pop();
    }
}

/// Validate a full module.
pub fn validate_module(module: &Module) -> Vec<Violation> {
    let mut c = Checker::new();
    for (i, stmt) in module.body.iter().enumerate() {
        c.enter(PathStep::Item("body", i), |c| walk_stmt(stmt, c));
    }
    c.out
}

/// Validate a single statement.
pub fn validate_statement(stmt: &Stmt) -> Vec<Violation> {
    let mut c = Checker::new();
    walk_stmt(stmt, &mut c);
    c.out
}

/// Validate a single expression.
pub fn validate_expr(expr: &Expr) -> Vec<Violation> {
    let mut c = Checker::new();
    walk_expr(expr, &mut c);
    c.out
}

fn check_op(c: &mut Checker, code: &'static str, op: &str, allowed: &[&str], kind: &str) {
    if !allowed.contains(&op) {
        c.report_field(code, "op", format!("invalid {kind} op: {op:?}"));
    }
}

fn walk_expr(expr: &Expr, c: &mut Checker) {
    match expr {
        // A Number is numeric by construction; NUM_TYPE only arises on the
        // raw form.
        Expr::Num(_) => {}
        Expr::Name(id) => {
            if id.is_empty() {
                c.report_field("NAME_ID", "id", "Name.id must be non-empty".to_string());
            }
        }
        Expr::Unary { op, operand } => {
            check_op(c, "UNARY_OP", op, UNARY_OPS, "unary");
            c.enter(PathStep::Field("operand"), |c| walk_expr(operand, c));
        }
        Expr::Binary { left, op, right } => {
            check_op(c, "BIN_OP", op, BINARY_OPS, "bin");
            c.enter(PathStep::Field("left"), |c| walk_expr(left, c));
            c.enter(PathStep::Field("right"), |c| walk_expr(right, c));
        }
        Expr::Compare { left, op, right } => {
            check_op(c, "CMP_OP", op, COMPARE_OPS, "compare");
            c.enter(PathStep::Field("left"), |c| walk_expr(left, c));
            c.enter(PathStep::Field("right"), |c| walk_expr(right, c));
        }
        Expr::BoolOp { op, left, right } => {
            check_op(c, "BOOL_OP", op, BOOL_OPS, "bool");
            c.enter(PathStep::Field("left"), |c| walk_expr(left, c));
            c.enter(PathStep::Field("right"), |c| walk_expr(right, c));
        }
    }
}

fn walk_stmt(stmt: &Stmt, c: &mut Checker) {
    match stmt {
        Stmt::Assign { target, value } => {
            if target.is_empty() {
                c.report_field(
                    "ASSIGN_TARGET",
                    "target",
                    "Assign.target must be non-empty".to_string(),
                );
            }
            c.enter(PathStep::Field("value"), |c| walk_expr(value, c));
        }
        Stmt::Print(argument) => {
            c.enter(PathStep::Field("argument"), |c| walk_expr(argument, c));
        }
        Stmt::If { test, body, orelse } => {
            c.enter(PathStep::Field("test"), |c| walk_expr(test, c));
            for (i, stmt) in body.iter().enumerate() {
                c.enter(PathStep::Item("body", i), |c| walk_stmt(stmt, c));
            }
            for (i, stmt) in orelse.iter().enumerate() {
                c.enter(PathStep::Item("orelse", i), |c| walk_stmt(stmt, c));
            }
        }
        Stmt::ForRange {
            target,
            start,
            stop,
            body,
        } => {
            if target.is_empty() {
                c.report_field(
                    "FOR_TARGET",
                    "target",
                    "ForRange.target must be non-empty".to_string(),
                );
            }
            c.enter(PathStep::Field("start"), |c| walk_expr(start, c));
            c.enter(PathStep::Field("stop"), |c| walk_expr(stop, c));
            for (i, stmt) in body.iter().enumerate() {
                c.enter(PathStep::Item("body", i), |c| walk_stmt(stmt, c));
            }
        }
    }
}

// Raw tagged-form validation

/// Validate a node in the neutral tagged-object form.
pub fn validate_obj(value: &Value) -> Vec<Violation> {
    let mut c = Checker::new();
    walk_obj(value, &mut c);
    c.out
}

/// Fetch a child node field and walk it; a missing or null child is a
/// `NONE_NODE` violation at the child's path.
fn walk_child(obj: &serde_json::Map<String, Value>, field: &'static str, c: &mut Checker) {
    c.enter(PathStep::Field(field), |c| match obj.get(field) {
        None | Some(Value::Null) => {
            c.report("NONE_NODE", "node is missing".to_string());
        }
        Some(child) => walk_obj(child, c),
    });
}

fn check_obj_op(
    obj: &serde_json::Map<String, Value>,
    code: &'static str,
    allowed: &[&str],
    kind: &str,
    c: &mut Checker,
) {
    let op = obj.get("op").and_then(Value::as_str);
    if !op.is_some_and(|op| allowed.contains(&op)) {
        c.report_field(code, "op", format!("invalid {kind} op: {:?}", op.unwrap_or("<missing>")));
    }
}

/// Walk a `body`-like field: must be an array of statement nodes.
fn walk_body(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    code: &'static str,
    c: &mut Checker,
) {
    match obj.get(field) {
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                c.enter(PathStep::Item(field, i), |c| walk_obj(item, c));
            }
        }
        _ => {
            c.report_field(code, field, format!("{field} must be an ordered sequence"));
        }
    }
}

fn walk_obj(value: &Value, c: &mut Checker) {
    if value.is_null() {
        c.report("NONE_NODE", "node is missing".to_string());
        return;
    }
    let Some(obj) = value.as_object() else {
        c.report("UNKNOWN_NODE", "node must be a tagged object".to_string());
        return;
    };
    let Some(tag) = obj.get("t").and_then(Value::as_str) else {
        c.report("UNKNOWN_NODE", "node has no 't' tag".to_string());
        return;
    };

    match tag {
        "NumberLiteral" => {
            if !obj.get("n").is_some_and(Value::is_number) {
                c.report_field("NUM_TYPE", "n", "n must be numeric".to_string());
            }
        }
        "NameRef" => {
            let id = obj.get("id").and_then(Value::as_str);
            if !id.is_some_and(|id| !id.is_empty()) {
                c.report_field("NAME_ID", "id", "id must be non-empty".to_string());
            }
        }
        "UnaryOp" => {
            check_obj_op(obj, "UNARY_OP", UNARY_OPS, "unary", c);
            walk_child(obj, "operand", c);
        }
        "BinaryOp" => {
            check_obj_op(obj, "BIN_OP", BINARY_OPS, "bin", c);
            walk_child(obj, "left", c);
            walk_child(obj, "right", c);
        }
        "Compare" => {
            check_obj_op(obj, "CMP_OP", COMPARE_OPS, "compare", c);
            walk_child(obj, "left", c);
            walk_child(obj, "right", c);
        }
        "BoolOp" => {
            check_obj_op(obj, "BOOL_OP", BOOL_OPS, "bool", c);
            walk_child(obj, "left", c);
            walk_child(obj, "right", c);
        }
        // Statement tags: not produced by the codec, but a parser-free
        // path may still hand them to the validator.
        "Assign" => {
            let target = obj.get("target").and_then(Value::as_str);
            if !target.is_some_and(|t| !t.is_empty()) {
                c.report_field(
                    "ASSIGN_TARGET",
                    "target",
                    "target must be non-empty".to_string(),
                );
            }
            walk_child(obj, "value", c);
        }
        "Print" => {
            walk_child(obj, "argument", c);
        }
        "If" => {
            walk_child(obj, "test", c);
            walk_body(obj, "body", "IF_BODY", c);
            walk_body(obj, "orelse", "IF_ORELSE", c);
        }
        "ForRange" => {
            let target = obj.get("target").and_then(Value::as_str);
            if !target.is_some_and(|t| !t.is_empty()) {
                c.report_field(
                    "FOR_TARGET",
                    "target",
                    "target must be non-empty".to_string(),
                );
            }
            walk_child(obj, "start", c);
            walk_child(obj, "stop", c);
            walk_body(obj, "body", "FOR_BODY", c);
        }
        "Module" => {
            walk_body(obj, "body", "MODULE_BODY", c);
        }
        other => {
            c.report("UNKNOWN_NODE", format!("unknown node tag: {other:?}"));
        }
    }
}
