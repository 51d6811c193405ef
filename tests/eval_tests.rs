// Integration tests for the tree-walking interpreter: numeric promotion,
// short-circuiting, truthiness, and statement execution.

use arbor::ast::{Expr, Module, Number, Stmt};
use arbor::environment::Environment;
use arbor::error::ArborError;
use arbor::interpreter::Interpreter;
use arbor::object::Object;

fn num(n: i64) -> Expr {
    Expr::Num(Number::Int(n))
}

fn float(f: f64) -> Expr {
    Expr::Num(Number::Float(f))
}

fn eval(expr: &Expr) -> Result<Object, ArborError> {
    let env = Environment::new();
    Interpreter::new().eval_expression(expr, &env)
}

fn run(module: &Module) -> Result<String, ArborError> {
    let mut interp = Interpreter::with_output(Vec::new());
    interp.eval_module(module)?;
    Ok(String::from_utf8(interp.into_output()).unwrap())
}

// Numeric promotion

#[test]
fn test_int_arithmetic_stays_integral() {
    assert_eq!(eval(&Expr::binary(num(3), "+", num(4))).unwrap(), Object::Integer(7));
    assert_eq!(eval(&Expr::binary(num(3), "*", num(4))).unwrap(), Object::Integer(12));
}

#[test]
fn test_true_division_always_floats() {
    assert_eq!(eval(&Expr::binary(num(10), "/", num(5))).unwrap(), Object::Float(2.0));
    assert_eq!(eval(&Expr::binary(num(7), "/", num(2))).unwrap(), Object::Float(3.5));
}

#[test]
fn test_mixed_operands_promote() {
    assert_eq!(
        eval(&Expr::binary(num(3), "+", float(0.5))).unwrap(),
        Object::Float(3.5)
    );
    assert_eq!(
        eval(&Expr::binary(float(2.0), "*", num(4))).unwrap(),
        Object::Float(8.0)
    );
}

#[test]
fn test_floor_division() {
    assert_eq!(eval(&Expr::binary(num(7), "//", num(2))).unwrap(), Object::Integer(3));
    // Floor division rounds toward negative infinity, not zero.
    assert_eq!(eval(&Expr::binary(num(-7), "//", num(2))).unwrap(), Object::Integer(-4));
    assert_eq!(eval(&Expr::binary(num(7), "//", num(-2))).unwrap(), Object::Integer(-4));
    assert_eq!(
        eval(&Expr::binary(float(7.5), "//", num(2))).unwrap(),
        Object::Float(3.0)
    );
}

#[test]
fn test_modulo_takes_divisor_sign() {
    assert_eq!(eval(&Expr::binary(num(7), "%", num(3))).unwrap(), Object::Integer(1));
    assert_eq!(eval(&Expr::binary(num(-7), "%", num(3))).unwrap(), Object::Integer(2));
    assert_eq!(eval(&Expr::binary(num(7), "%", num(-3))).unwrap(), Object::Integer(-2));
}

#[test]
fn test_exponentiation() {
    assert_eq!(eval(&Expr::binary(num(2), "**", num(10))).unwrap(), Object::Integer(1024));
    // A negative exponent promotes to float.
    assert_eq!(eval(&Expr::binary(num(2), "**", num(-1))).unwrap(), Object::Float(0.5));
    assert_eq!(
        eval(&Expr::binary(float(4.0), "**", float(0.5))).unwrap(),
        Object::Float(2.0)
    );
}

#[test]
fn test_division_by_zero_is_an_error() {
    for op in ["/", "//", "%"] {
        let result = eval(&Expr::binary(num(1), op, num(0)));
        assert!(
            matches!(result, Err(ArborError::Runtime { .. })),
            "expected zero-division error for {op}, got {result:?}"
        );
    }
}

#[test]
fn test_integer_pow_overflow_is_an_error() {
    let result = eval(&Expr::binary(num(10), "**", num(100)));
    assert!(matches!(result, Err(ArborError::Runtime { .. })));
}

#[test]
fn test_integer_arithmetic_overflow_is_an_error() {
    let cases = [
        Expr::binary(num(i64::MAX), "+", num(1)),
        Expr::binary(num(i64::MIN), "-", num(1)),
        Expr::binary(num(i64::MAX / 2 + 1), "*", num(2)),
        Expr::binary(num(i64::MIN), "//", num(-1)),
        Expr::binary(num(i64::MIN), "%", num(-1)),
        Expr::unary("-", num(i64::MIN)),
    ];
    for expr in cases {
        let result = eval(&expr);
        assert!(
            matches!(result, Err(ArborError::Runtime { .. })),
            "expected an overflow error, got {result:?}"
        );
    }
}

#[test]
fn test_overflow_from_source_text_is_an_error() {
    // Each literal fits in 64 bits on its own; only the results overflow.
    assert!(matches!(
        arbor::eval("9223372036854775807 + 1"),
        Err(ArborError::Runtime { .. })
    ));
    assert!(matches!(
        arbor::eval("4611686018427387904 * 2"),
        Err(ArborError::Runtime { .. })
    ));
}

// Unary operators

#[test]
fn test_unary_operators() {
    assert_eq!(eval(&Expr::unary("-", num(5))).unwrap(), Object::Integer(-5));
    assert_eq!(eval(&Expr::unary("+", float(2.5))).unwrap(), Object::Float(2.5));
    assert_eq!(eval(&Expr::unary("not", num(0))).unwrap(), Object::Boolean(true));
    assert_eq!(eval(&Expr::unary("not", num(3))).unwrap(), Object::Boolean(false));
}

#[test]
fn test_booleans_join_arithmetic_as_integers() {
    // Booleans are 0/1 in arithmetic, same as in comparisons.
    let truth = Expr::unary("not", num(0));
    assert_eq!(
        eval(&Expr::binary(truth.clone(), "+", num(1))).unwrap(),
        Object::Integer(2)
    );
    assert_eq!(eval(&Expr::unary("-", truth.clone())).unwrap(), Object::Integer(-1));
    assert_eq!(
        eval(&Expr::binary(truth, "*", float(2.5))).unwrap(),
        Object::Float(2.5)
    );
}

// Comparisons

#[test]
fn test_comparisons_return_booleans() {
    let cases = [
        ("<", 3, 5, true),
        (">", 3, 5, false),
        ("==", 4, 4, true),
        ("!=", 4, 4, false),
        ("<=", 5, 5, true),
        (">=", 4, 5, false),
    ];
    for (op, l, r, expected) in cases {
        let expr = Expr::Compare {
            left: Box::new(num(l)),
            op: op.to_string(),
            right: Box::new(num(r)),
        };
        assert_eq!(
            eval(&expr).unwrap(),
            Object::Boolean(expected),
            "{l} {op} {r}"
        );
    }
}

#[test]
fn test_mixed_comparison_promotes() {
    let expr = Expr::Compare {
        left: Box::new(num(3)),
        op: "<".to_string(),
        right: Box::new(float(3.5)),
    };
    assert_eq!(eval(&expr).unwrap(), Object::Boolean(true));
}

// Boolean operators

fn bool_op(op: &str, left: Expr, right: Expr) -> Expr {
    Expr::BoolOp {
        op: op.to_string(),
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[test]
fn test_and_short_circuits() {
    // A falsy left operand is returned as-is; the right operand must not be
    // evaluated — here it would fail with an undefined name.
    let expr = bool_op("and", num(0), Expr::Name("missing".to_string()));
    assert_eq!(eval(&expr).unwrap(), Object::Integer(0));
}

#[test]
fn test_or_short_circuits() {
    let expr = bool_op("or", num(7), Expr::Name("missing".to_string()));
    assert_eq!(eval(&expr).unwrap(), Object::Integer(7));
}

#[test]
fn test_bool_ops_return_operand_values() {
    assert_eq!(eval(&bool_op("and", num(1), num(2))).unwrap(), Object::Integer(2));
    assert_eq!(eval(&bool_op("or", num(0), num(5))).unwrap(), Object::Integer(5));
}

// Names and internal consistency

#[test]
fn test_undefined_name_is_an_error() {
    match eval(&Expr::Name("x".to_string())) {
        Err(ArborError::UndefinedName { name }) => assert_eq!(name, "x"),
        other => panic!("expected an undefined-name error, got {other:?}"),
    }
}

#[test]
fn test_out_of_set_operator_is_internal_failure() {
    let result = eval(&Expr::binary(num(1), "@", num(2)));
    match result {
        Err(ArborError::InvalidOperator { op }) => assert_eq!(op, "@"),
        other => panic!("expected an invalid-operator error, got {other:?}"),
    }
}

// Statements

fn assign(target: &str, value: Expr) -> Stmt {
    Stmt::Assign {
        target: target.to_string(),
        value,
    }
}

fn name(id: &str) -> Expr {
    Expr::Name(id.to_string())
}

#[test]
fn test_assign_and_print() {
    let module = Module::new(vec![
        assign("x", Expr::binary(num(2), "+", num(3))),
        Stmt::Print(name("x")),
    ]);
    assert_eq!(run(&module).unwrap(), "5\n");
}

#[test]
fn test_if_takes_truthy_branch() {
    let module = Module::new(vec![
        assign("x", num(1)),
        Stmt::If {
            test: name("x"),
            body: vec![Stmt::Print(num(10))],
            orelse: vec![Stmt::Print(num(20))],
        },
    ]);
    assert_eq!(run(&module).unwrap(), "10\n");
}

#[test]
fn test_if_takes_orelse_when_falsy() {
    let module = Module::new(vec![Stmt::If {
        test: num(0),
        body: vec![Stmt::Print(num(10))],
        orelse: vec![Stmt::Print(num(20))],
    }]);
    assert_eq!(run(&module).unwrap(), "20\n");
}

#[test]
fn test_if_empty_orelse() {
    let module = Module::new(vec![Stmt::If {
        test: num(0),
        body: vec![Stmt::Print(num(10))],
        orelse: vec![],
    }]);
    assert_eq!(run(&module).unwrap(), "");
}

#[test]
fn test_for_range_sums_half_open_interval() {
    // x = 0; for i in [1, 4): x = x + i; print(x) — 1 + 2 + 3 = 6
    let module = Module::new(vec![
        assign("x", num(0)),
        Stmt::ForRange {
            target: "i".to_string(),
            start: num(1),
            stop: num(4),
            body: vec![assign("x", Expr::binary(name("x"), "+", name("i")))],
        },
        Stmt::Print(name("x")),
    ]);
    assert_eq!(run(&module).unwrap(), "6\n");
}

#[test]
fn test_for_range_empty_when_start_not_below_stop() {
    let module = Module::new(vec![
        assign("x", num(0)),
        Stmt::ForRange {
            target: "i".to_string(),
            start: num(4),
            stop: num(1),
            body: vec![assign("x", num(99))],
        },
        Stmt::Print(name("x")),
    ]);
    assert_eq!(run(&module).unwrap(), "0\n");
}

#[test]
fn test_for_range_leaves_loop_variable_bound() {
    let module = Module::new(vec![
        Stmt::ForRange {
            target: "i".to_string(),
            start: num(0),
            stop: num(3),
            body: vec![],
        },
        Stmt::Print(name("i")),
    ]);
    assert_eq!(run(&module).unwrap(), "2\n");
}

#[test]
fn test_for_range_bounds_must_be_integers() {
    let module = Module::new(vec![Stmt::ForRange {
        target: "i".to_string(),
        start: float(1.5),
        stop: num(3),
        body: vec![],
    }]);
    assert!(matches!(run(&module), Err(ArborError::Runtime { .. })));
}

#[test]
fn test_module_environment_is_not_shared() {
    // Each eval_module starts from a fresh environment.
    let mut interp = Interpreter::with_output(Vec::new());
    interp
        .eval_module(&Module::new(vec![assign("x", num(1))]))
        .unwrap();
    let result = interp.eval_module(&Module::new(vec![Stmt::Print(name("x"))]));
    assert!(matches!(result, Err(ArborError::UndefinedName { .. })));
}

#[test]
fn test_print_floats_and_booleans() {
    let module = Module::new(vec![
        Stmt::Print(Expr::binary(num(7), "/", num(2))),
        Stmt::Print(Expr::unary("not", num(0))),
    ]);
    assert_eq!(run(&module).unwrap(), "3.5\ntrue\n");
}
