use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use super::KpError;

/// A JSON value whose containers can no longer be changed.
///
/// Produced by [`freeze`] (and therefore by [`super::load`]). Mappings and
/// sequences at every depth are [`FrozenMap`] and [`FrozenList`]; scalars are
/// stored as parsed. Serializes exactly like the [`Value`] it was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum FrozenValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(FrozenList),
    Object(FrozenMap),
}

/// Read-only mapping. Iterates in the order keys appeared in the source
/// document; equality ignores order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenMap(Arc<IndexMap<String, FrozenValue>>);

/// Read-only sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenList(Arc<[FrozenValue]>);

/// Recursively convert every mapping and sequence into its frozen form.
pub fn freeze(value: Value) -> FrozenValue {
    match value {
        Value::Null => FrozenValue::Null,
        Value::Bool(b) => FrozenValue::Bool(b),
        Value::Number(n) => FrozenValue::Number(n),
        Value::String(s) => FrozenValue::String(s),
        Value::Array(items) => FrozenValue::Array(FrozenList(items.into_iter().map(freeze).collect())),
        Value::Object(map) => FrozenValue::Object(FrozenMap(Arc::new(
            map.into_iter().map(|(k, v)| (k, freeze(v))).collect(),
        ))),
    }
}

impl From<Value> for FrozenValue {
    fn from(value: Value) -> Self {
        freeze(value)
    }
}

impl FrozenValue {
    /// Deep copy back into a plain, mutable [`Value`].
    pub fn thaw(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(list) => Value::Array(list.iter().map(FrozenValue::thaw).collect()),
            Self::Object(map) => Value::Object(map.iter().map(|(k, v)| (k.to_string(), v.thaw())).collect()),
        }
    }

    /// Member lookup; `None` unless this is an object holding `key`.
    pub fn get(&self, key: &str) -> Option<&FrozenValue> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&FrozenList> {
        match self {
            Self::Array(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FrozenMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl FrozenMap {
    const KIND: &'static str = "FrozenMap";

    pub fn get(&self, key: &str) -> Option<&FrozenValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &FrozenValue> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrozenValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Every mutating operation is rejected.

    pub fn insert(&self, _key: impl Into<String>, _value: FrozenValue) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "insert"))
    }

    pub fn set(&self, _key: impl Into<String>, _value: FrozenValue) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "set"))
    }

    pub fn set_default(&self, _key: impl Into<String>, _value: FrozenValue) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "set_default"))
    }

    pub fn remove(&self, _key: &str) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "remove"))
    }

    pub fn pop_first(&self) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "pop_first"))
    }

    pub fn extend<I>(&self, _entries: I) -> Result<(), KpError>
    where
        I: IntoIterator<Item = (String, FrozenValue)>,
    {
        Err(KpError::immutable(Self::KIND, "extend"))
    }

    pub fn clear(&self) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "clear"))
    }
}

impl FrozenList {
    const KIND: &'static str = "FrozenList";

    pub fn get(&self, index: usize) -> Option<&FrozenValue> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&FrozenValue> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&FrozenValue> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrozenValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Every mutating operation is rejected.

    pub fn set(&self, _index: usize, _value: FrozenValue) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "set"))
    }

    pub fn push(&self, _value: FrozenValue) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "push"))
    }

    pub fn insert(&self, _index: usize, _value: FrozenValue) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "insert"))
    }

    pub fn extend<I>(&self, _values: I) -> Result<(), KpError>
    where
        I: IntoIterator<Item = FrozenValue>,
    {
        Err(KpError::immutable(Self::KIND, "extend"))
    }

    pub fn pop(&self) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "pop"))
    }

    pub fn remove(&self, _index: usize) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "remove"))
    }

    pub fn clear(&self) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "clear"))
    }

    pub fn sort(&self) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "sort"))
    }

    pub fn reverse(&self) -> Result<(), KpError> {
        Err(KpError::immutable(Self::KIND, "reverse"))
    }
}

impl<'a> IntoIterator for &'a FrozenList {
    type Item = &'a FrozenValue;
    type IntoIter = std::slice::Iter<'a, FrozenValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for FrozenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(list) => list.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for FrozenList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for FrozenMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
