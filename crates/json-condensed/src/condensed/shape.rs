//! Object shape keys and the per-payload shape dictionary.
//!
//! The shape of an object is its sorted key set. Objects sharing a shape
//! are the main source of redundancy in real payloads, so the writer
//! assigns small indices to shapes that occur more than once and emits the
//! key list a single time.

use std::collections::HashMap;

use crate::value::{ObjectEntries, Value};

use super::constants::{KEY_FINAL_BIT, MAX_RARE_OBJECT_ID, RESERVED_SHAPE_INDEX};

/// Computes the canonical byte string identifying an object's key set.
///
/// Keys are sorted lexicographically and concatenated without separators;
/// instead the last byte of every key is marked by OR-ing [`KEY_FINAL_BIT`]
/// and an empty key contributes a lone marker byte. Returns `None` when a
/// key contains a byte the framing cannot carry (`0x00` or ≥ `0x80`); such
/// objects take the hashtable encoding.
pub fn shape_key(entries: &ObjectEntries) -> Option<Vec<u8>> {
    let mut keys: Vec<&[u8]> = entries.iter().map(|(k, _)| k.as_bytes()).collect();
    keys.sort_unstable();
    let mut composed = Vec::new();
    for key in keys {
        let Some((&last, head)) = key.split_last() else {
            composed.push(KEY_FINAL_BIT);
            continue;
        };
        if key.iter().any(|&b| b == 0 || b >= 0x80) {
            return None;
        }
        composed.extend_from_slice(head);
        composed.push(last | KEY_FINAL_BIT);
    }
    Some(composed)
}

/// A shape registered for indexed encoding.
#[derive(Debug, Clone, Copy)]
pub struct ShapeEntry {
    /// Wire index of the shape.
    pub index: usize,
    /// Whether the key list has been emitted yet.
    pub used: bool,
}

/// Per-payload table mapping shape keys to wire indices.
///
/// Built once per encode call and discarded with it; nothing is shared
/// across payloads.
pub struct ShapeDictionary {
    entries: HashMap<Vec<u8>, ShapeEntry>,
}

impl ShapeDictionary {
    /// Walks a tree, counts shape occurrences and assigns indices by
    /// descending count. Ties break on the shape-key bytes so independent
    /// encode runs produce identical output. Shapes seen once stay
    /// unregistered, as do any past the index space.
    pub fn build(root: &Value) -> Self {
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        count_shapes(root, &mut counts);
        let mut ordered: Vec<(Vec<u8>, usize)> =
            counts.into_iter().filter(|(_, count)| *count > 1).collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut entries = HashMap::new();
        let mut index = 0;
        for (key, _) in ordered {
            if index == RESERVED_SHAPE_INDEX {
                index += 1;
            }
            if index > MAX_RARE_OBJECT_ID {
                break;
            }
            entries.insert(key, ShapeEntry { index, used: false });
            index += 1;
        }
        Self { entries }
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut ShapeEntry> {
        self.entries.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn count_shapes(value: &Value, counts: &mut HashMap<Vec<u8>, usize>) {
    match value {
        Value::Object(entries) => {
            if !entries.is_empty() {
                if let Some(key) = shape_key(entries) {
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
            for (_, child) in entries {
                count_shapes(child, counts);
            }
        }
        Value::Array(elements) => {
            for element in elements {
                count_shapes(element, counts);
            }
        }
        _ => {}
    }
}
