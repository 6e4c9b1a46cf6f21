//! Property store
//!
//! The authoritative name-to-value mapping. The store tracks first-write
//! order so enumeration reports names in the order they appeared, and it
//! reports on every write whether the name is new, which is what lets the
//! container decide between descriptor registration and a plain update.

use crate::value::Value;
use rustc_hash::FxHashMap;

/// Result of invoking a stored value by name
///
/// Absence and non-callability are distinct outcomes, never collapsed into
/// one failure mode: a caller can tell "no such member" apart from "member
/// exists but is not callable".
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeOutcome {
    /// No property with the requested name exists
    Missing,
    /// The property exists but its value is not callable
    NotCallable,
    /// The callable was invoked and produced a result
    Invoked(Value),
}

impl InvokeOutcome {
    /// Check whether the name was absent
    pub fn is_missing(&self) -> bool {
        matches!(self, InvokeOutcome::Missing)
    }

    /// Check whether the name was present but not callable
    pub fn is_not_callable(&self) -> bool {
        matches!(self, InvokeOutcome::NotCallable)
    }

    /// Check whether the callable ran
    pub fn is_invoked(&self) -> bool {
        matches!(self, InvokeOutcome::Invoked(_))
    }

    /// Extract the invocation result, if any
    pub fn into_value(self) -> Option<Value> {
        match self {
            InvokeOutcome::Invoked(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn dispatch(lookup: Option<Value>, args: &[Value]) -> InvokeOutcome {
        match lookup {
            None => InvokeOutcome::Missing,
            Some(Value::Function(f)) => InvokeOutcome::Invoked(f.call(args)),
            Some(_) => InvokeOutcome::NotCallable,
        }
    }
}

/// Name-to-value mapping with stable first-write order
#[derive(Debug, Default)]
pub struct PropertyStore {
    /// Current value per name
    values: FxHashMap<String, Value>,
    /// Names in the order they were first written
    order: Vec<String>,
}

impl PropertyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Get the current value for a name
    ///
    /// Absence is reported as `None`, never as an error.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Set the value for a name, returning `true` on first write
    ///
    /// Always succeeds. Reassigning a present name replaces its value in
    /// place and returns `false`.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        let is_new = self.values.insert(name.to_string(), value).is_none();
        if is_new {
            self.order.push(name.to_string());
        }
        is_new
    }

    /// Invoke the value stored under a name
    ///
    /// No implicit creation: an absent name reports
    /// [`InvokeOutcome::Missing`], a present non-callable value reports
    /// [`InvokeOutcome::NotCallable`].
    pub fn invoke(&self, name: &str, args: &[Value]) -> InvokeOutcome {
        InvokeOutcome::dispatch(self.get(name), args)
    }

    /// Snapshot of known names in first-write order
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Snapshot of every name and its current value
    pub fn to_map(&self) -> FxHashMap<String, Value> {
        self.values.clone()
    }

    /// Check whether a name is present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of stored properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the store holds no properties
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_returns_none() {
        let store = PropertyStore::new();
        assert_eq!(store.get("absent"), None);
    }

    #[test]
    fn test_set_reports_first_write() {
        let mut store = PropertyStore::new();
        assert!(store.set("x", Value::Int(1)));
        assert!(!store.set("x", Value::Int(2)));
        assert_eq!(store.get("x"), Some(Value::Int(2)));
    }

    #[test]
    fn test_names_in_first_write_order() {
        let mut store = PropertyStore::new();
        store.set("b", Value::Int(1));
        store.set("a", Value::Int(2));
        store.set("b", Value::Int(3));
        store.set("c", Value::Int(4));
        assert_eq!(store.names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_invoke_missing() {
        let store = PropertyStore::new();
        assert!(store.invoke("absent", &[]).is_missing());
    }

    #[test]
    fn test_invoke_not_callable() {
        let mut store = PropertyStore::new();
        store.set("n", Value::Int(42));
        assert!(store.invoke("n", &[]).is_not_callable());
    }

    #[test]
    fn test_invoke_callable_receives_args() {
        let mut store = PropertyStore::new();
        store.set(
            "sum",
            Value::function(|args| {
                let total: i64 = args.iter().filter_map(|a| a.as_int()).sum();
                Value::Int(total)
            }),
        );
        let outcome = store.invoke("sum", &[Value::Int(1), Value::Int(2)]);
        assert_eq!(outcome, InvokeOutcome::Invoked(Value::Int(3)));
    }

    #[test]
    fn test_to_map_matches_names() {
        let mut store = PropertyStore::new();
        store.set("a", Value::Int(1));
        store.set("b", Value::from("two"));
        let map = store.to_map();
        assert_eq!(map.len(), store.len());
        for name in store.names() {
            assert_eq!(map.get(&name).cloned(), store.get(&name));
        }
    }

    #[test]
    fn test_contains_and_len() {
        let mut store = PropertyStore::new();
        assert!(store.is_empty());
        store.set("x", Value::Null);
        assert!(store.contains("x"));
        assert!(!store.contains("y"));
        assert_eq!(store.len(), 1);
    }
}
