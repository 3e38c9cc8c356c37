use crate::{
    eval::environment::Environment,
    parser::ast::{self, Block, Ident},
};
use std::{
    cell::RefCell,
    fmt,
    fmt::{Debug, Display},
    rc::Rc,
};

pub type BuiltinFn = fn(Vec<Object>) -> Object;

/// Classification carried by every runtime error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionErrorKind {
    InvalidIdentifier,
    InvalidToken,
    UnknownOperator,
    TypeMismatch,
    WrongArity,
    IndexOutOfBounds,
    DivisionByZero,
}

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Object>),
    /// Transparent wrapper carrying a `return` value up to the nearest
    /// function-call (or program) boundary, where it is unwrapped once.
    Return(Box<Object>),
    Error(AssertionErrorKind, String),
    Function(Vec<Ident>, Block, Rc<RefCell<Environment>>),
    Builtin(&'static str, BuiltinFn),
    Null,
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Return(_) => "RETURN",
            Object::Error(..) => "ERROR",
            Object::Function(..) => "FUNCTION",
            Object::Builtin(..) => "BUILTIN",
            Object::Null => "NULL",
        }
    }

    /// The zero-is-false convention: `null`, `false`, `0`, `""` and `[]`
    /// are false, every other value is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Null => false,
            Object::Boolean(value) => *value,
            Object::Integer(value) => *value != 0,
            Object::String(value) => !value.is_empty(),
            Object::Array(elements) => !elements.is_empty(),
            _ => true,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Array(elements) => write!(
                f,
                "[{}]",
                elements
                    .iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            Object::Return(value) => write!(f, "{}", value),
            Object::Error(_, message) => write!(f, "ERROR: {}", message),
            Object::Function(params, body, _) => {
                write!(f, "fn({}) {{ {} }}", params.join(", "), ast::fmt_block(body))
            }
            Object::Builtin(name, _) => write!(f, "builtin function: {}", name),
            Object::Null => write!(f, "null"),
        }
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "Object::Integer({})", value),
            Object::Boolean(value) => write!(f, "Object::Boolean({})", value),
            Object::String(value) => write!(f, r#"Object::String("{}")"#, value),
            Object::Array(elements) => write!(f, "Object::Array({:?})", elements),
            Object::Return(value) => write!(f, "Object::Return({:?})", value),
            Object::Error(kind, message) => {
                write!(f, "Object::Error({:?}, {:?})", kind, message)
            }
            // the captured environment may be cyclic, so it stays out of
            // the debug form
            Object::Function(params, body, _) => write!(
                f,
                "Object::Function(fn({}) {{ {} }})",
                params.join(", "),
                ast::fmt_block(body)
            ),
            Object::Builtin(name, _) => write!(f, "Object::Builtin({})", name),
            Object::Null => write!(f, "Object::Null"),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Return(a), Object::Return(b)) => a == b,
            (Object::Error(kind_a, msg_a), Object::Error(kind_b, msg_b)) => {
                kind_a == kind_b && msg_a == msg_b
            }
            (
                Object::Function(params_a, body_a, env_a),
                Object::Function(params_b, body_b, env_b),
            ) => params_a == params_b && body_a == body_b && Rc::ptr_eq(env_a, env_b),
            (Object::Builtin(name_a, _), Object::Builtin(name_b, _)) => name_a == name_b,
            (Object::Null, Object::Null) => true,
            _ => false,
        }
    }
}
