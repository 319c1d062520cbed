//! The dynamic JSON value model.
//!
//! A [`Value`] is a tagged union over null, booleans, numbers, strings,
//! arrays and objects. There is no integer/float split at this level:
//! numbers are IEEE 754 doubles, and integer-ness is a property of the
//! Condensed wire form only. A number decoded from a sized float tag
//! carries a [`Precision`] hint that guides re-encoding.

mod error;

use std::fmt;

pub use error::ValueError;

/// The six value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Bit width a number was carried with on the Condensed wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Half,
    Single,
    Double,
}

/// A numeric value with an optional wire-precision hint.
///
/// The hint is set by the Condensed decoder and honored by the encoder so
/// that decode/encode cycles are byte-stable. It never participates in
/// equality: a number decoded from an integer tag compares equal to the
/// same number decoded from a DOUBLE tag.
#[derive(Debug, Clone, Copy)]
pub struct Number {
    pub value: f64,
    pub hint: Option<Precision>,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Self { value, hint: None }
    }

    pub fn with_hint(value: f64, hint: Precision) -> Self {
        Self {
            value,
            hint: Some(hint),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Object entries, in insertion order. Keys are unique.
pub type ObjectEntries = Vec<(String, Value)>;

/// A dynamic JSON-compatible value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(ObjectEntries),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    /// Returns the active variant's kind.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    fn mismatch(&self, expected: Kind) -> ValueError {
        ValueError::TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(Kind::Bool)),
        }
    }

    pub fn as_number(&self) -> Result<f64, ValueError> {
        match self {
            Value::Number(n) => Ok(n.value),
            _ => Err(self.mismatch(Kind::Number)),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    pub fn as_array(&self) -> Result<&Vec<Value>, ValueError> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>, ValueError> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&ObjectEntries, ValueError> {
        match self {
            Value::Object(o) => Ok(o),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut ObjectEntries, ValueError> {
        match self {
            Value::Object(o) => Ok(o),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    /// Replaces the variant with null.
    pub fn set_null(&mut self) {
        *self = Value::Null;
    }

    /// Replaces the variant with a boolean.
    pub fn set_bool(&mut self, b: bool) {
        *self = Value::Bool(b);
    }

    /// Replaces the variant with a number. Any precision hint is cleared.
    pub fn set_number(&mut self, x: f64) {
        *self = Value::Number(Number::new(x));
    }

    /// Replaces the variant with a string.
    pub fn set_string(&mut self, s: impl Into<String>) {
        *self = Value::String(s.into());
    }

    /// Replaces the variant with an empty array and returns it.
    pub fn set_array(&mut self) -> &mut Vec<Value> {
        *self = Value::Array(Vec::new());
        match self {
            Value::Array(a) => a,
            _ => unreachable!(),
        }
    }

    /// Replaces the variant with an empty object and returns its entries.
    pub fn set_object(&mut self) -> &mut ObjectEntries {
        *self = Value::Object(Vec::new());
        match self {
            Value::Object(o) => o,
            _ => unreachable!(),
        }
    }

    /// Element count of a string (bytes), array or object.
    pub fn len(&self) -> Result<usize, ValueError> {
        match self {
            Value::String(s) => Ok(s.len()),
            Value::Array(a) => Ok(a.len()),
            Value::Object(o) => Ok(o.len()),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    pub fn is_empty(&self) -> Result<bool, ValueError> {
        Ok(self.len()? == 0)
    }

    /// Appends a value to an array.
    pub fn push(&mut self, value: Value) -> Result<(), ValueError> {
        self.as_array_mut()?.push(value);
        Ok(())
    }

    /// Array element access.
    pub fn get(&self, index: usize) -> Result<&Value, ValueError> {
        let array = self.as_array()?;
        let len = array.len();
        array
            .get(index)
            .ok_or(ValueError::IndexOutOfRange { index, len })
    }

    /// Mutable array element access.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Value, ValueError> {
        let array = self.as_array_mut()?;
        let len = array.len();
        array
            .get_mut(index)
            .ok_or(ValueError::IndexOutOfRange { index, len })
    }

    /// Object member access by key.
    pub fn member(&self, key: &str) -> Result<&Value, ValueError> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ValueError::KeyNotFound(key.to_owned()))
    }

    /// Mutable object member access by key.
    pub fn member_mut(&mut self, key: &str) -> Result<&mut Value, ValueError> {
        self.as_object_mut()?
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ValueError::KeyNotFound(key.to_owned()))
    }

    /// Inserts or replaces an object member, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, ValueError> {
        let key = key.into();
        let entries = self.as_object_mut()?;
        for (k, v) in entries.iter_mut() {
            if *k == key {
                return Ok(Some(std::mem::replace(v, value)));
            }
        }
        entries.push((key, value));
        Ok(None)
    }

    /// Member access that inserts `Null` when the key is missing.
    pub fn entry(&mut self, key: impl Into<String>) -> Result<&mut Value, ValueError> {
        let key = key.into();
        let entries = self.as_object_mut()?;
        let position = entries.iter().position(|(k, _)| *k == key);
        let index = match position {
            Some(index) => index,
            None => {
                entries.push((key, Value::Null));
                entries.len() - 1
            }
        };
        Ok(&mut entries[index].1)
    }
}

/// Inserts or replaces an entry in a raw entry list, keeping keys unique.
/// Decoders use this so malformed duplicate keys collapse to last-wins.
pub(crate) fn upsert(entries: &mut ObjectEntries, key: String, value: Value) {
    for (k, v) in entries.iter_mut() {
        if *k == key {
            *v = value;
            return;
        }
    }
    entries.push((key, value));
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // Objects compare by key set, independent of insertion order.
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| bk == k && bv == v))
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(Number::new(x))
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(Number::new(x as f64))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}
