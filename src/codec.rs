//! AST ⇄ JSON round-trip codec.
//!
//! Every encoded node is a tagged object: a `t` field naming the node kind
//! plus that kind's fields, children encoded recursively. The codec covers
//! the expression kinds only; statements have no wire form.
//!
//! Encoding is deterministic: `serde_json`'s default map keeps keys sorted,
//! so two equal trees serialize to byte-identical text with no extra sort
//! step.

use crate::ast::{Expr, Number};
use crate::error::{ArborError, Result};
use serde_json::{json, Map, Value};

/// Convert an expression tree to its tagged serializable form.
pub fn to_obj(expr: &Expr) -> Value {
    match expr {
        Expr::Num(Number::Int(n)) => json!({ "t": "NumberLiteral", "n": n }),
        Expr::Num(Number::Float(f)) => json!({ "t": "NumberLiteral", "n": f }),
        Expr::Name(id) => json!({ "t": "NameRef", "id": id }),
        Expr::Unary { op, operand } => json!({
            "t": "UnaryOp",
            "op": op,
            "operand": to_obj(operand),
        }),
        Expr::Binary { left, op, right } => json!({
            "t": "BinaryOp",
            "op": op,
            "left": to_obj(left),
            "right": to_obj(right),
        }),
        Expr::Compare { left, op, right } => json!({
            "t": "Compare",
            "op": op,
            "left": to_obj(left),
            "right": to_obj(right),
        }),
        Expr::BoolOp { op, left, right } => json!({
            "t": "BoolOp",
            "op": op,
            "left": to_obj(left),
            "right": to_obj(right),
        }),
    }
}

/// Reconstruct an expression tree from its tagged form, dispatching
/// strictly on the `t` tag.
pub fn from_obj(value: &Value) -> Result<Expr> {
    let obj = value
        .as_object()
        .ok_or_else(|| ArborError::decode("node must be a tagged object"))?;
    let tag = obj
        .get("t")
        .and_then(Value::as_str)
        .ok_or_else(|| ArborError::decode("node has no 't' tag"))?;

    match tag {
        "NumberLiteral" => {
            let n = field(obj, tag, "n")?;
            if let Some(i) = n.as_i64() {
                Ok(Expr::Num(Number::Int(i)))
            } else if let Some(f) = n.as_f64() {
                Ok(Expr::Num(Number::Float(f)))
            } else {
                Err(ArborError::decode("NumberLiteral.n must be numeric"))
            }
        }
        "NameRef" => {
            let id = field(obj, tag, "id")?
                .as_str()
                .ok_or_else(|| ArborError::decode("NameRef.id must be a string"))?;
            Ok(Expr::Name(id.to_string()))
        }
        "UnaryOp" => Ok(Expr::Unary {
            op: op_field(obj, tag)?,
            operand: Box::new(from_obj(field(obj, tag, "operand")?)?),
        }),
        "BinaryOp" => Ok(Expr::Binary {
            left: Box::new(from_obj(field(obj, tag, "left")?)?),
            op: op_field(obj, tag)?,
            right: Box::new(from_obj(field(obj, tag, "right")?)?),
        }),
        "Compare" => Ok(Expr::Compare {
            left: Box::new(from_obj(field(obj, tag, "left")?)?),
            op: op_field(obj, tag)?,
            right: Box::new(from_obj(field(obj, tag, "right")?)?),
        }),
        "BoolOp" => Ok(Expr::BoolOp {
            op: op_field(obj, tag)?,
            left: Box::new(from_obj(field(obj, tag, "left")?)?),
            right: Box::new(from_obj(field(obj, tag, "right")?)?),
        }),
        other => Err(ArborError::UnknownTag {
            tag: other.to_string(),
        }),
    }
}

fn field<'a>(obj: &'a Map<String, Value>, tag: &str, name: &str) -> Result<&'a Value> {
    obj.get(name)
        .ok_or_else(|| ArborError::decode(format!("{tag} is missing field '{name}'")))
}

fn op_field(obj: &Map<String, Value>, tag: &str) -> Result<String> {
    Ok(field(obj, tag, "op")?
        .as_str()
        .ok_or_else(|| ArborError::decode(format!("{tag}.op must be a string")))?
        .to_string())
}
