use std::fmt;

use crate::{ast::LitValue, common::format_number};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Only `nil` and `false` are falsy; `0` and `""` are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(boolean) => *boolean,
            Value::Number(_) => true,
            Value::String(_) => true,
        }
    }
}

impl From<&LitValue> for Value {
    fn from(lit: &LitValue) -> Self {
        match lit {
            LitValue::Nil => Value::Nil,
            LitValue::Bool(boolean) => Value::Bool(*boolean),
            LitValue::Number(number) => Value::Number(*number),
            LitValue::String(string) => Value::String(string.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(boolean) => write!(f, "{}", boolean),
            Value::Number(number) => f.write_str(&format_number(*number)),
            Value::String(string) => f.write_str(string),
        }
    }
}
