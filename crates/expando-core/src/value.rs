//! Dynamic value representation
//!
//! Property values are untyped until stored: a [`Value`] can hold any of the
//! supported runtime shapes, including callables. The declared type recorded
//! in a property descriptor is derived from a value's runtime shape via
//! [`TypeKind::of`].

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Runtime representation of a property value
///
/// Values are owned and cheap to clone: scalar variants copy, container
/// variants clone their contents, and functions clone a shared handle.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent/null value
    Null,

    /// Boolean (true/false)
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit float
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed map of values
    Object(FxHashMap<String, Value>),

    /// Callable value (invoked with an argument slice)
    Function(NativeFunction),
}

impl Value {
    /// Create a function value from a Rust closure
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Function(NativeFunction::new(f))
    }

    /// Get the runtime type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a boolean value
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if this is an integer value
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Check if this is a float value
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an array value
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this is an object value
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if this is a callable value
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as value slice if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get as map reference if this is an object
    pub fn as_object(&self) -> Option<&FxHashMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Get as callable if this is a function
    pub fn as_function(&self) -> Option<&NativeFunction> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Function(_) => write!(f, "<function>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<FxHashMap<String, Value>> for Value {
    fn from(map: FxHashMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<NativeFunction> for Value {
    fn from(f: NativeFunction) -> Self {
        Value::Function(f)
    }
}

/// Shared callable stored as a property value
///
/// Wraps a Rust closure behind a shared handle; clones alias the same
/// closure. Equality is identity: two handles are equal only when they
/// point at the same underlying closure.
#[derive(Clone)]
pub struct NativeFunction {
    f: Arc<dyn Fn(&[Value]) -> Value + Send + Sync>,
}

impl NativeFunction {
    /// Wrap a closure as a callable value
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Invoke the callable with an argument slice
    pub fn call(&self, args: &[Value]) -> Value {
        (self.f)(args)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        // Identity comparison on the data pointer; the vtable half of the
        // fat pointer is not stable across codegen units.
        std::ptr::eq(
            Arc::as_ptr(&self.f) as *const (),
            Arc::as_ptr(&other.f) as *const (),
        )
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction")
    }
}

/// Declared-type marker recorded in property descriptors
///
/// Computed once from the first value assigned to a property; `Any` stands
/// in when the first value is null and carries no concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// No concrete type (first value was null)
    Any,
    /// Boolean values
    Bool,
    /// Integer values
    Int,
    /// Float values
    Float,
    /// String values
    String,
    /// Array values
    Array,
    /// Object values
    Object,
    /// Callable values
    Function,
}

impl TypeKind {
    /// Compute the declared type for a value's runtime shape
    pub fn of(value: &Value) -> TypeKind {
        match value {
            Value::Null => TypeKind::Any,
            Value::Bool(_) => TypeKind::Bool,
            Value::Int(_) => TypeKind::Int,
            Value::Float(_) => TypeKind::Float,
            Value::String(_) => TypeKind::String,
            Value::Array(_) => TypeKind::Array,
            Value::Object(_) => TypeKind::Object,
            Value::Function(_) => TypeKind::Function,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Any => write!(f, "any"),
            TypeKind::Bool => write!(f, "bool"),
            TypeKind::Int => write!(f, "int"),
            TypeKind::Float => write!(f, "float"),
            TypeKind::String => write!(f, "string"),
            TypeKind::Array => write!(f, "array"),
            TypeKind::Object => write!(f, "object"),
            TypeKind::Function => write!(f, "function"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::Float(1.5).type_name(), "float");
        assert_eq!(Value::from("hi").type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::function(|_| Value::Null).type_name(), "function");
    }

    #[test]
    fn test_type_kind_of_null_is_any() {
        assert_eq!(TypeKind::of(&Value::Null), TypeKind::Any);
        assert_eq!(TypeKind::of(&Value::Int(3)), TypeKind::Int);
        assert_eq!(TypeKind::of(&Value::from("x")), TypeKind::String);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from("abc"), Value::String("abc".to_string()));
    }

    #[test]
    fn test_function_identity_equality() {
        let f = NativeFunction::new(|_| Value::Int(1));
        let same = f.clone();
        let other = NativeFunction::new(|_| Value::Int(1));
        assert_eq!(f, same);
        assert_ne!(f, other);
    }

    #[test]
    fn test_function_call() {
        let sum = Value::function(|args| {
            let total: i64 = args.iter().filter_map(|a| a.as_int()).sum();
            Value::Int(total)
        });
        let result = sum
            .as_function()
            .map(|f| f.call(&[Value::Int(1), Value::Int(2)]));
        assert_eq!(result, Some(Value::Int(3)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(
            Value::Array(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(TypeKind::Any.to_string(), "any");
        assert_eq!(TypeKind::Function.to_string(), "function");
    }
}
