//! Tree-walking evaluation of the AST against a mutable environment.
//!
//! Numeric semantics follow the usual dynamic-language promotion rules:
//! integer-integer arithmetic stays integral except `/`, which always
//! produces a float; any operation touching a float promotes; booleans join
//! arithmetic as 0/1; `//` is floor division; `%` takes the sign of the
//! divisor; `**` stays integral for non-negative integer exponents.
//! Division and modulo by zero are runtime errors, as is any integer result
//! that does not fit the fixed 64-bit width.

use crate::ast::{Expr, Module, Number, Stmt};
use crate::environment::Environment;
use crate::error::{ArborError, Result};
use crate::object::Object;
use std::io::{self, Write};

pub struct Interpreter<W: Write> {
    /// Sink for `Print` statements. Stdout by default, injectable in tests.
    out: W,
}

impl Interpreter<io::Stdout> {
    pub fn new() -> Self {
        Interpreter { out: io::stdout() }
    }
}

impl Default for Interpreter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Self {
        Interpreter { out }
    }

    /// Consume the interpreter, returning the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute a module's statements in order against a fresh environment,
    /// which is discarded at the end.
    pub fn eval_module(&mut self, module: &Module) -> Result<()> {
        let mut env = Environment::new();
        for stmt in &module.body {
            self.eval_statement(stmt, &mut env)?;
        }
        Ok(())
    }

    pub fn eval_statement(&mut self, stmt: &Stmt, env: &mut Environment) -> Result<()> {
        match stmt {
            Stmt::Assign { target, value } => {
                let val = self.eval_expression(value, env)?;
                env.set(target.clone(), val);
                Ok(())
            }
            Stmt::Print(argument) => {
                let val = self.eval_expression(argument, env)?;
                writeln!(self.out, "{}", val)
                    .map_err(|e| ArborError::runtime(format!("print failed: {e}")))
            }
            Stmt::If { test, body, orelse } => {
                let branch = if self.eval_expression(test, env)?.is_truthy() {
                    body
                } else {
                    orelse
                };
                for stmt in branch {
                    self.eval_statement(stmt, env)?;
                }
                Ok(())
            }
            Stmt::ForRange {
                target,
                start,
                stop,
                body,
            } => {
                // Bounds are evaluated once, not per iteration.
                let start = self.expect_integer(start, env, "range start")?;
                let stop = self.expect_integer(stop, env, "range stop")?;
                for i in start..stop {
                    env.set(target.clone(), Object::Integer(i));
                    for stmt in body {
                        self.eval_statement(stmt, env)?;
                    }
                }
                Ok(())
            }
        }
    }

    pub fn eval_expression(&self, expr: &Expr, env: &Environment) -> Result<Object> {
        match expr {
            Expr::Num(Number::Int(n)) => Ok(Object::Integer(*n)),
            Expr::Num(Number::Float(f)) => Ok(Object::Float(*f)),
            Expr::Name(id) => env
                .get(id)
                .ok_or_else(|| ArborError::UndefinedName { name: id.clone() }),
            Expr::Unary { op, operand } => {
                let val = self.eval_expression(operand, env)?;
                eval_unary(op, val)
            }
            Expr::Binary { left, op, right } => {
                let left_val = self.eval_expression(left, env)?;
                let right_val = self.eval_expression(right, env)?;
                eval_binary(op, left_val, right_val)
            }
            Expr::Compare { left, op, right } => {
                let left_val = self.eval_expression(left, env)?;
                let right_val = self.eval_expression(right, env)?;
                eval_compare(op, left_val, right_val)
            }
            Expr::BoolOp { op, left, right } => {
                let left_val = self.eval_expression(left, env)?;
                match op.as_str() {
                    // Short-circuit: the right operand is only evaluated
                    // when the left does not decide the result, and the
                    // deciding operand's value is returned as-is.
                    "and" => {
                        if !left_val.is_truthy() {
                            Ok(left_val)
                        } else {
                            self.eval_expression(right, env)
                        }
                    }
                    "or" => {
                        if left_val.is_truthy() {
                            Ok(left_val)
                        } else {
                            self.eval_expression(right, env)
                        }
                    }
                    other => Err(ArborError::InvalidOperator {
                        op: other.to_string(),
                    }),
                }
            }
        }
    }

    fn expect_integer(&self, expr: &Expr, env: &Environment, what: &str) -> Result<i64> {
        match self.eval_expression(expr, env)? {
            Object::Integer(i) => Ok(i),
            other => Err(ArborError::runtime(format!(
                "{what} must be an integer, got {}",
                other.type_name()
            ))),
        }
    }
}

fn eval_unary(op: &str, val: Object) -> Result<Object> {
    match op {
        "-" => match numeric_operand(val) {
            Number::Int(i) => i
                .checked_neg()
                .map(Object::Integer)
                .ok_or_else(|| ArborError::runtime("integer overflow in unary '-'")),
            Number::Float(f) => Ok(Object::Float(-f)),
        },
        "+" => Ok(match numeric_operand(val) {
            Number::Int(i) => Object::Integer(i),
            Number::Float(f) => Object::Float(f),
        }),
        "not" => Ok(Object::Boolean(!val.is_truthy())),
        other => Err(ArborError::InvalidOperator {
            op: other.to_string(),
        }),
    }
}

/// View an operand as a number for arithmetic. Booleans participate as
/// 0/1, like the comparison path.
fn numeric_operand(val: Object) -> Number {
    match val {
        Object::Integer(i) => Number::Int(i),
        Object::Float(f) => Number::Float(f),
        Object::Boolean(b) => Number::Int(b as i64),
    }
}

fn eval_binary(op: &str, left: Object, right: Object) -> Result<Object> {
    match (numeric_operand(left), numeric_operand(right)) {
        (Number::Int(l), Number::Int(r)) => eval_binary_int(op, l, r),
        (Number::Int(l), Number::Float(r)) => eval_binary_float(op, l as f64, r),
        (Number::Float(l), Number::Int(r)) => eval_binary_float(op, l, r as f64),
        (Number::Float(l), Number::Float(r)) => eval_binary_float(op, l, r),
    }
}

/// Map a checked-arithmetic result to an object, overflow to a runtime
/// error.
fn checked_int(result: Option<i64>, op: &str) -> Result<Object> {
    result
        .map(Object::Integer)
        .ok_or_else(|| ArborError::runtime(format!("integer overflow in '{op}'")))
}

fn eval_binary_int(op: &str, l: i64, r: i64) -> Result<Object> {
    match op {
        "+" => checked_int(l.checked_add(r), op),
        "-" => checked_int(l.checked_sub(r), op),
        "*" => checked_int(l.checked_mul(r), op),
        // True division always produces a float.
        "/" => {
            if r == 0 {
                Err(ArborError::runtime("division by zero"))
            } else {
                Ok(Object::Float(l as f64 / r as f64))
            }
        }
        "//" => {
            if r == 0 {
                Err(ArborError::runtime("integer division by zero"))
            } else {
                // Floor division: round the truncating quotient toward
                // negative infinity when the signs disagree. checked_div
                // catches i64::MIN // -1; the q - 1 adjustment never fires
                // when q is i64::MIN, since that needs a zero remainder.
                let q = l.checked_div(r);
                let Some(q) = q else {
                    return Err(ArborError::runtime("integer overflow in '//'"));
                };
                let rem = l % r;
                Ok(Object::Integer(if rem != 0 && (rem < 0) != (r < 0) {
                    q - 1
                } else {
                    q
                }))
            }
        }
        "%" => {
            if r == 0 {
                Err(ArborError::runtime("modulo by zero"))
            } else {
                // Floor-division sign convention: result takes the sign of
                // the divisor. When the signs disagree, rem + r moves toward
                // zero and cannot overflow.
                let rem = l
                    .checked_rem(r)
                    .ok_or_else(|| ArborError::runtime("integer overflow in '%'"))?;
                Ok(Object::Integer(if rem != 0 && (rem < 0) != (r < 0) {
                    rem + r
                } else {
                    rem
                }))
            }
        }
        "**" => {
            if r >= 0 {
                let exp = u32::try_from(r)
                    .ok()
                    .and_then(|e| l.checked_pow(e))
                    .ok_or_else(|| ArborError::runtime("integer overflow in '**'"))?;
                Ok(Object::Integer(exp))
            } else {
                Ok(Object::Float((l as f64).powf(r as f64)))
            }
        }
        other => Err(ArborError::InvalidOperator {
            op: other.to_string(),
        }),
    }
}

fn eval_binary_float(op: &str, l: f64, r: f64) -> Result<Object> {
    match op {
        "+" => Ok(Object::Float(l + r)),
        "-" => Ok(Object::Float(l - r)),
        "*" => Ok(Object::Float(l * r)),
        "/" => {
            if r == 0.0 {
                Err(ArborError::runtime("division by zero"))
            } else {
                Ok(Object::Float(l / r))
            }
        }
        "//" => {
            if r == 0.0 {
                Err(ArborError::runtime("integer division by zero"))
            } else {
                Ok(Object::Float((l / r).floor()))
            }
        }
        "%" => {
            if r == 0.0 {
                Err(ArborError::runtime("modulo by zero"))
            } else {
                Ok(Object::Float(l - r * (l / r).floor()))
            }
        }
        "**" => Ok(Object::Float(l.powf(r))),
        other => Err(ArborError::InvalidOperator {
            op: other.to_string(),
        }),
    }
}

fn eval_compare(op: &str, left: Object, right: Object) -> Result<Object> {
    // Booleans compare as 0/1, matching the host numeric tower.
    let result = match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => compare_ord(op, &l, &r)?,
        (l, r) => compare_ord(op, &numeric(l), &numeric(r))?,
    };
    Ok(Object::Boolean(result))
}

fn numeric(val: Object) -> f64 {
    match val {
        Object::Integer(i) => i as f64,
        Object::Float(f) => f,
        Object::Boolean(b) => b as i64 as f64,
    }
}

fn compare_ord<T: PartialOrd>(op: &str, l: &T, r: &T) -> Result<bool> {
    match op {
        "<" => Ok(l < r),
        ">" => Ok(l > r),
        "==" => Ok(l == r),
        "!=" => Ok(l != r),
        "<=" => Ok(l <= r),
        ">=" => Ok(l >= r),
        other => Err(ArborError::InvalidOperator {
            op: other.to_string(),
        }),
    }
}
