//! Reading reference values off a record.

use crate::error::{KeysetError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Source of reference values for predicate building.
///
/// Reads must be free of side effects and return the same value when an
/// attribute is read more than once during one build.
pub trait RecordValues {
    fn attribute(&self, name: &str) -> Result<Value>;
}

impl RecordValues for Map<String, Value> {
    fn attribute(&self, name: &str) -> Result<Value> {
        self.get(name)
            .cloned()
            .ok_or_else(|| KeysetError::missing_attribute(name))
    }
}

impl RecordValues for Value {
    fn attribute(&self, name: &str) -> Result<Value> {
        match self {
            Value::Object(map) => map.attribute(name),
            other => Err(KeysetError::attribute_read(
                name,
                format!("record is not a JSON object: {other}"),
            )),
        }
    }
}

impl<S: std::hash::BuildHasher> RecordValues for HashMap<String, Value, S> {
    fn attribute(&self, name: &str) -> Result<Value> {
        self.get(name)
            .cloned()
            .ok_or_else(|| KeysetError::missing_attribute(name))
    }
}

impl RecordValues for BTreeMap<String, Value> {
    fn attribute(&self, name: &str) -> Result<Value> {
        self.get(name)
            .cloned()
            .ok_or_else(|| KeysetError::missing_attribute(name))
    }
}

impl<T: RecordValues + ?Sized> RecordValues for &T {
    fn attribute(&self, name: &str) -> Result<Value> {
        (**self).attribute(name)
    }
}

/// Adapter turning a closure into a record
pub struct FnRecord<F>(pub F);

impl<F> RecordValues for FnRecord<F>
where
    F: Fn(&str) -> Result<Value>,
{
    fn attribute(&self, name: &str) -> Result<Value> {
        (self.0)(name)
    }
}

/// Serialize any record type into a JSON object usable as [`RecordValues`]
pub fn to_record_values<T: Serialize>(record: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(KeysetError::attribute_read(
            "*",
            format!("record serialized to a non-object value: {other}"),
        )),
        Err(e) => Err(KeysetError::attribute_read("*", e.to_string())),
    }
}
