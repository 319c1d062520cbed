//! Conversions between [`Value`] and [`serde_json::Value`].
//!
//! `serde_json` keeps integers and floats apart while [`Value`] unifies
//! them, so the mapping re-splits numbers on the way out: integral doubles
//! inside the `i64`/`u64` ranges become JSON integers, everything else a
//! JSON float. Non-finite numbers have no JSON form and map to null.

use crate::value::{Number, Value};

/// Builds a [`Value`] tree from a `serde_json` tree.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            Value::Number(Number::new(n.as_f64().unwrap_or(f64::NAN)))
        }
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(elements) => {
            Value::Array(elements.iter().map(from_json).collect())
        }
        serde_json::Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect(),
        ),
    }
}

/// Builds a `serde_json` tree from a [`Value`] tree.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => {
            let v = n.value;
            if v.trunc() == v && v >= i64::MIN as f64 && v < 9_223_372_036_854_775_808.0 {
                serde_json::Value::Number((v as i64).into())
            } else if v.trunc() == v
                && v >= 9_223_372_036_854_775_808.0
                && v < 18_446_744_073_709_551_616.0
            {
                serde_json::Value::Number((v as u64).into())
            } else {
                serde_json::Number::from_f64(v)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(to_json).collect())
        }
        Value::Object(entries) => {
            let mut map = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                map.insert(k.clone(), to_json(v));
            }
            serde_json::Value::Object(map)
        }
    }
}
