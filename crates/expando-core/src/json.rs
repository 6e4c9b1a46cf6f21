//! JSON conversion for serializer consumers
//!
//! Serializers are external collaborators that only need a mapping from
//! member names to plain data. This module converts [`Value`] trees to and
//! from `serde_json::Value`:
//!
//! - NaN and infinite floats are rejected as errors
//! - Callables carry no data and convert to null
//! - Incoming JSON numbers become `Int` when they are exact integers

use crate::error::{Error, Result};
use crate::object::Expando;
use crate::value::Value;
use rustc_hash::FxHashMap;

impl Value {
    /// Convert this value to a JSON value
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Int(i) => Ok(serde_json::Value::Number((*i).into())),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| Error::UnserializableValue {
                    type_name: self.type_name(),
                    detail: format!("{} has no JSON representation", f),
                }),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Array(items) => {
                let converted: Result<Vec<serde_json::Value>> =
                    items.iter().map(Value::to_json).collect();
                Ok(serde_json::Value::Array(converted?))
            }
            Value::Object(map) => {
                let mut object = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json()?);
                }
                Ok(serde_json::Value::Object(object))
            }
            // Callables carry behavior, not data.
            Value::Function(_) => Ok(serde_json::Value::Null),
        }
    }

    /// Build a value from a JSON value
    ///
    /// Total: every JSON value has a representation. Numbers that are exact
    /// integers become `Int`; everything else numeric becomes `Float`.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let mut converted = FxHashMap::default();
                for (key, value) in map {
                    converted.insert(key, Value::from_json(value));
                }
                Value::Object(converted)
            }
        }
    }
}

impl Expando {
    /// Snapshot the container as a JSON object with one entry per member
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let snapshot = self.to_map();
        let mut object = serde_json::Map::with_capacity(snapshot.len());
        for name in self.names() {
            if let Some(value) = snapshot.get(&name) {
                object.insert(name, value.to_json()?);
            }
        }
        Ok(serde_json::Value::Object(object))
    }
}
