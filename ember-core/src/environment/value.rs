use std::{cell::RefCell, fmt, fmt::Display, rc::Rc};

use crate::parser::prelude::{Block, Identifier};

use super::prelude::Environment;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NULL: Value = Value::Null;

#[derive(Debug, Clone)]
pub enum Value {
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
    String {
        value: String
    },
    Null,
    /// Control signal carrying an early exit up to the nearest call
    /// boundary; never user-visible once unwrapped.
    Return {
        value: Box<Value>
    },
    /// Recoverable failure as a first-class value.
    Error {
        message: String
    },
    Function(Rc<Function>),
    Builtin(Builtin),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::String { .. } => ValueType::String,
            Self::Null => ValueType::Null,
            Self::Return { .. } => ValueType::Return,
            Self::Error { .. } => ValueType::Error,
            Self::Function(_) => ValueType::Function,
            Self::Builtin(_) => ValueType::Builtin
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

// Structural equality for the scalar variants only. Functions compare by
// closure identity, never by shape: two literals that happen to read the
// same still produce distinct values.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer { value: left }, Value::Integer { value: right }) => left == right,
            (Value::Boolean { value: left }, Value::Boolean { value: right }) => left == right,
            (Value::String { value: left }, Value::String { value: right }) => left == right,
            (Value::Null, Value::Null) => true,
            (Value::Return { value: left }, Value::Return { value: right }) => left == right,
            (Value::Error { message: left }, Value::Error { message: right }) => left == right,
            (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
            (Value::Builtin(left), Value::Builtin(right)) => left.name == right.name,
            _ => false
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::String { value } => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::Return { value } => write!(f, "{value}"),
            Value::Error { message } => write!(f, "Error: {message}"),
            Value::Function(function) => {
                let parameters = function.parameters.iter()
                    .map(|parameter| parameter.to_string())
                    .collect::<Vec<String>>();

                write!(f, "function({}) {}", parameters.join(", "), function.body)
            },
            Value::Builtin(_) => write!(f, "builtin function")
        }
    }
}

/// A closure: the literal's parameter list and body together with the
/// environment captured at its definition site.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}

// Shallow on purpose: printing the captured environment would chase the
// closure cycle back into this function.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

pub type BuiltinFn = fn(Vec<Value>) -> Value;

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Boolean,
    String,
    Null,
    Return,
    Error,
    Function,
    Builtin
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Null => "NULL",
            Self::Return => "RETURN",
            Self::Error => "ERROR",
            Self::Function => "FUNCTION",
            Self::Builtin => "BUILTIN"
        };

        write!(f, "{name}")
    }
}
