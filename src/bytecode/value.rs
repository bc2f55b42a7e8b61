//! Runtime value representation.

use std::fmt;
use std::rc::Rc;

/// A runtime value on the VM stack or in a chunk's constant pool.
///
/// Strings are reference-counted so that loading one from the constant
/// pool and duplicating it on the stack never copies the character data.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Str(Rc<String>),
    Null,
}

impl Value {
    pub fn string(text: impl Into<String>) -> Value {
        Value::Str(Rc::new(text.into()))
    }

    /// Truthiness: null is false, a boolean is itself, everything else is
    /// true. The number 0 and the empty string are deliberately truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Null => "null",
        }
    }
}

/// Structural equality. Values of different kinds are unequal, never an
/// error, so equality is total over the value set.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn test_equality_within_a_kind() {
        assert_eq!(Value::Number(1.5), Value::Number(1.5));
        assert_ne!(Value::Number(1.5), Value::Number(2.5));
        assert_eq!(Value::string("a"), Value::string("a"));
        assert_eq!(Value::Null, Value::Null);
    }

    #[test]
    fn test_equality_across_kinds_is_false() {
        assert_ne!(Value::Number(0.0), Value::Bool(false));
        assert_ne!(Value::Number(1.0), Value::string("1"));
        assert_ne!(Value::Bool(false), Value::Null);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
