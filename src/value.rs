// ABOUTME: Value types for the interpreted language's data model

use crate::error::InterpretError;
use std::fmt;
use std::rc::Rc;

/// A function value: parameter names, its body as cleaned source lines,
/// and a deep snapshot of the scope stack at definition time.
///
/// The snapshot is an owned `Vec<HashMap<..>>`, not a shared `Rc` chain
/// to a parent environment the way a conventional lexical closure would
/// be wired. Capture here is by deep copy, so later reassignment in the
/// defining scope must not be observed by the function. Wrapping the
/// whole value in `Rc` just keeps `Value::clone()` cheap; the `closure`
/// field inside is never mutated after construction.
#[derive(Debug)]
pub struct FunctionValue {
    pub params: Vec<String>,
    pub body: Vec<String>,
    pub closure: Vec<std::collections::HashMap<String, Value>>,
}

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    List(Vec<Value>),
    /// Keys are Values, in practice strings or integers, kept as an
    /// association list rather than a hash map since `Value` doesn't
    /// implement `Hash` (floats don't).
    Map(Vec<(Value, Value)>),
    Function(Rc<FunctionValue>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Function(_) => "function",
        }
    }

    /// Truthiness used by `if`/`while`/short-circuit logic.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Function(_) => true,
        }
    }

    /// Numeric coercion shared by arithmetic and ordering comparisons.
    /// Bools coerce the way Python's `bool` (an `int` subtype) does.
    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Bool(_))
    }

    /// `==` / `!=` never raise: mismatched kinds simply compare unequal.
    pub fn values_equal(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Str(x), Value::Str(y)) => x == y,
            (Value::List(x), Value::List(y)) => {
                x.len() == y.len() && x.iter().zip(y).all(|(a, b)| Value::values_equal(a, b))
            }
            (Value::Map(x), Value::Map(y)) => {
                x.len() == y.len()
                    && x.iter().all(|(k, v)| {
                        y.iter()
                            .any(|(k2, v2)| Value::values_equal(k, k2) && Value::values_equal(v, v2))
                    })
            }
            _ if a.is_numeric() && b.is_numeric() => a.as_f64() == b.as_f64(),
            _ => false,
        }
    }

    /// Ordering comparison for `< <= > >=`. Incompatible kinds raise
    /// `TypeError`.
    pub fn compare(a: &Value, b: &Value) -> Result<std::cmp::Ordering, InterpretError> {
        if a.is_numeric() && b.is_numeric() {
            return a
                .as_f64()
                .unwrap()
                .partial_cmp(&b.as_f64().unwrap())
                .ok_or_else(|| InterpretError::TypeError("NaN is not orderable".to_string()));
        }
        if let (Value::Str(x), Value::Str(y)) = (a, b) {
            return Ok(x.cmp(y));
        }
        Err(InterpretError::TypeError(format!(
            "{}와(과) {}은(는) 비교할 수 없음",
            a.type_name(),
            b.type_name()
        )))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Null => write!(f, "None"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.repr())?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k.repr(), v.repr())?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "Function({})", func.params.join(", ")),
        }
    }
}

impl Value {
    /// Quoted representation used for nested display inside lists/maps.
    /// A top-level string never gets quoted, but one nested inside a
    /// container does.
    fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }
}
