use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use gc::{Finalize, Gc, Trace};
use thiserror::Error;

use crate::environment::Environment;
use gibbon_lang_core::ast;

#[derive(Debug, PartialEq, Clone, Trace, Finalize)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Gc<Object>>),
    Hash(HashMap<HashKey, (Gc<Object>, Gc<Object>)>),
    Function(Function),
    Builtin(BuiltinFunction),
    Quote(#[unsafe_ignore_trace] ast::Expression),
    Macro(MacroObject),
    Null,
}

/// Hash keys pair the value's type with its content, so keys of
/// different types can never collide. Only these three types are
/// hashable.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Trace, Finalize)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

thread_local! {
    static NULL: Gc<Object> = Gc::new(Object::Null);
    static TRUE: Gc<Object> = Gc::new(Object::Boolean(true));
    static FALSE: Gc<Object> = Gc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Gc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Gc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Gc<Object> {
        Gc::new(Object::Integer(value))
    }
    pub fn string(value: String) -> Gc<Object> {
        Gc::new(Object::String(value))
    }
    pub fn array(array: Vec<Gc<Object>>) -> Gc<Object> {
        Gc::new(Object::Array(array))
    }
    pub fn hash(hash: HashMap<HashKey, (Gc<Object>, Gc<Object>)>) -> Gc<Object> {
        Gc::new(Object::Hash(hash))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: ast::BlockStatement,
        env: Environment,
    ) -> Gc<Object> {
        Gc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }
    pub fn quote(expression: ast::Expression) -> Gc<Object> {
        Gc::new(Object::Quote(expression))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "Integer",
            Object::Boolean(_) => "Boolean",
            Object::String(_) => "String",
            Object::Array(_) => "Array",
            Object::Hash(_) => "Hash",
            Object::Function(_) => "Function",
            Object::Builtin(_) => "Builtin",
            Object::Quote(_) => "Quote",
            Object::Macro(_) => "Macro",
            Object::Null => "Null",
        }
    }
}

/// The canonical printed form. `==` and `!=` on values without a more
/// specific comparison rule compare these strings.
impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Array(array) => {
                write!(f, "[")?;
                for (i, element) in array.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Object::Hash(hash) => {
                // Sorted by printed key so the output does not depend on
                // map iteration order
                let mut pairs = hash
                    .values()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect::<Vec<_>>();
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Object::Function(function) => write!(
                f,
                "fn({}) {}",
                join_names(&function.parameters),
                function.body
            ),
            Object::Macro(macro_object) => write!(
                f,
                "macro({}) {}",
                join_names(&macro_object.parameters),
                macro_object.body
            ),
            Object::Builtin(builtin) => write!(f, "builtin function: {}", builtin.name),
            Object::Quote(expression) => write!(f, "quote({})", expression),
        }
    }
}

fn join_names(identifiers: &[ast::Identifier]) -> String {
    identifiers
        .iter()
        .map(|id| id.name.as_ref())
        .collect::<Vec<&str>>()
        .join(", ")
}

#[derive(Clone, Trace, Finalize)]
pub struct Function {
    #[unsafe_ignore_trace]
    pub parameters: Vec<ast::Identifier>,
    #[unsafe_ignore_trace]
    pub body: ast::BlockStatement,
    pub env: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.env.ptr_eq(&other.env)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("ptr", &(self as *const Function as usize))
            .finish()
    }
}

#[derive(Clone, Trace, Finalize)]
pub struct MacroObject {
    #[unsafe_ignore_trace]
    pub parameters: Vec<ast::Identifier>,
    #[unsafe_ignore_trace]
    pub body: ast::BlockStatement,
    pub env: Environment,
}

impl PartialEq for MacroObject {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.env.ptr_eq(&other.env)
    }
}

impl std::fmt::Debug for MacroObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Macro")
            .field("ptr", &(self as *const MacroObject as usize))
            .finish()
    }
}

#[derive(Clone, Trace, Finalize)]
pub struct BuiltinFunction {
    #[unsafe_ignore_trace]
    pub name: &'static str,
    #[unsafe_ignore_trace]
    #[allow(clippy::type_complexity)]
    pub func: fn(Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError>,
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.func as usize == other.func as usize
    }
}

impl std::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .finish()
    }
}

/// Control flow travelling on the error channel: a `return` on its way
/// to the nearest call boundary, or an error aborting evaluation
/// outright. Both pass through block statements untouched.
#[derive(Debug, PartialEq)]
pub enum QuickReturn {
    Return(Gc<Object>),
    Error(EvaluationError),
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvaluationError {
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: &'static str,
        right: &'static str,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        operator: &'static str,
        right: &'static str,
    },
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: &'static str,
        right: &'static str,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(Rc<str>),
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(&'static str),
    #[error("index op not supported: {0}")]
    IndexNotSupported(&'static str),
    #[error("division by zero")]
    DivisionByZero,
    #[error("{0}")]
    BuiltinFunctionError(Rc<str>),
}

pub fn object_to_key(object: &Gc<Object>) -> Result<HashKey, EvaluationError> {
    match object.as_ref() {
        Object::Integer(value) => Ok(HashKey::Integer(*value)),
        Object::Boolean(value) => Ok(HashKey::Boolean(*value)),
        Object::String(value) => Ok(HashKey::String(value.clone())),
        _ => Err(EvaluationError::UnusableHashKey(object.type_name())),
    }
}
