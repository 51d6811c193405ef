use std::fmt;

/// A runtime value produced by evaluation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Object {
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Object {
    /// Truthiness: `0`, `0.0`, and `false` are falsy, everything else is
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Integer(i) => *i != 0,
            Object::Float(f) => *f != 0.0,
            Object::Boolean(b) => *b,
        }
    }

    /// A short name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "integer",
            Object::Float(_) => "float",
            Object::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(val) => write!(f, "{}", val),
            Object::Float(val) => write!(f, "{}", val),
            Object::Boolean(val) => write!(f, "{}", val),
        }
    }
}
