//! `CondensedEncoder` — Condensed binary writer.

use json_condensed_buffers::{encode_f15, fits_f15, Writer};

use crate::value::{Number, ObjectEntries, Precision, Value};

use super::constants::*;
use super::shape::{shape_key, ShapeDictionary};

/// Two to the 63rd, the first integral double past `i64`.
const I64_MAX_P1: f64 = 9_223_372_036_854_775_808.0;
/// Two to the 64th, the first integral double past `u64`.
const U64_MAX_P1: f64 = 18_446_744_073_709_551_616.0;
/// Low 44 bits of the double mantissa; when they are all clear the value
/// fits the eight mantissa bits the half form keeps.
const LOW_MANTISSA_MASK: u64 = 0x0000_0fff_ffff_ffff;

/// Options for [`CondensedEncoder`].
#[derive(Debug, Clone, Copy)]
pub struct CondensedEncoderOptions {
    /// Wire precision preferred for floats whose value does not force a
    /// specific width. Affects writer output only.
    pub preferred: Precision,
}

impl Default for CondensedEncoderOptions {
    fn default() -> Self {
        Self {
            preferred: Precision::Half,
        }
    }
}

/// Condensed binary writer.
///
/// Output is deterministic for a given tree: a fresh [`ShapeDictionary`] is
/// built per encode call, shape-encoded objects emit their fields in
/// sorted-key order, and integer narrowing always picks the smallest tag
/// whose range contains the value.
pub struct CondensedEncoder {
    pub writer: Writer,
    options: CondensedEncoderOptions,
}

impl Default for CondensedEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CondensedEncoder {
    pub fn new() -> Self {
        Self::with_options(CondensedEncoderOptions::default())
    }

    pub fn with_options(options: CondensedEncoderOptions) -> Self {
        Self {
            writer: Writer::new(),
            options,
        }
    }

    /// Encode a value and return the Condensed bytes.
    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.writer.reset();
        let mut shapes = ShapeDictionary::build(value);
        self.write_any(value, &mut shapes);
        self.writer.flush()
    }

    fn write_any(&mut self, value: &Value, shapes: &mut ShapeDictionary) {
        match value {
            Value::Null => self.writer.u8(NIL),
            Value::Bool(true) => self.writer.u8(TRUE),
            Value::Bool(false) => self.writer.u8(FALSE),
            Value::Number(n) => self.write_number(n),
            Value::String(s) => self.write_str(s),
            Value::Array(elements) => self.write_arr(elements, shapes),
            Value::Object(entries) => self.write_obj(entries, shapes),
        }
    }

    fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        if bytes.len() <= MAX_SHORT_STRING_LEN {
            self.writer.u8(SHORT_STRING | bytes.len() as u8);
            self.writer.buf(bytes);
        } else {
            self.writer.u8(LONG_STRING);
            self.writer.buf(bytes);
            self.writer.u8(TERMINATOR);
        }
    }

    fn write_arr(&mut self, elements: &[Value], shapes: &mut ShapeDictionary) {
        if elements.len() <= MAX_SHORT_ARRAY_LEN {
            self.writer.u8(SHORT_ARRAY | elements.len() as u8);
            for element in elements {
                self.write_any(element, shapes);
            }
        } else {
            self.writer.u8(LONG_ARRAY);
            for element in elements {
                self.write_any(element, shapes);
            }
            self.writer.u8(TERMINATOR);
        }
    }

    fn write_number(&mut self, number: &Number) {
        let v = number.value;
        // A wire-precision hint wins over integer narrowing: a decoded
        // half like 4.0 must re-encode to the same two bytes it came from.
        if let Some(precision) = number.hint {
            return self.write_float_as(precision, v);
        }
        if v.trunc() == v && (-I64_MAX_P1..I64_MAX_P1).contains(&v) {
            return self.write_integer(v as i64);
        }
        if v.trunc() == v && (I64_MAX_P1..U64_MAX_P1).contains(&v) {
            // Integral but past i64; the unsigned long tag carries it
            // losslessly.
            return self.writer.u8u64_le(UNSIGNED_LONG_INTEGER, v as u64);
        }
        self.write_float_as(self.choose_precision(v), v);
    }

    fn write_integer(&mut self, value: i64) {
        if (-16..=15).contains(&value) {
            self.writer.u8(MINIMAL_INTEGER | (value as u8 & 0x1f));
        } else if (-2048..=2047).contains(&value) {
            self.writer.u8(VERY_SHORT_INTEGER | ((value >> 8) as u8 & 0x0f));
            self.writer.u8(value as u8);
        } else if let Ok(short) = i16::try_from(value) {
            self.writer.u8u16_le(SIGNED_SHORT_INTEGER, short as u16);
        } else if let Ok(short) = u16::try_from(value) {
            self.writer.u8u16_le(UNSIGNED_SHORT_INTEGER, short);
        } else if let Ok(int) = i32::try_from(value) {
            self.writer.u8u32_le(SIGNED_INTEGER, int as u32);
        } else if let Ok(int) = u32::try_from(value) {
            self.writer.u8u32_le(UNSIGNED_INTEGER, int);
        } else {
            self.writer.u8u64_le(SIGNED_LONG_INTEGER, value as u64);
        }
    }

    fn write_float_as(&mut self, precision: Precision, value: f64) {
        match precision {
            Precision::Half => {
                let [b0, b1] = encode_f15(value);
                self.writer.u8(b0);
                self.writer.u8(b1);
            }
            Precision::Single => {
                self.writer.u8(FLOAT);
                self.writer.f32_le(value as f32);
            }
            Precision::Double => {
                self.writer.u8(DOUBLE);
                self.writer.f64_le(value);
            }
        }
    }

    fn choose_precision(&self, value: f64) -> Precision {
        if !value.is_finite() {
            return Precision::Double;
        }
        let a = value.abs();
        if a > f32::MAX as f64 || (a > 0.0 && a < f32::MIN_POSITIVE as f64) {
            return Precision::Double;
        }
        let narrow_mantissa = value.to_bits() & LOW_MANTISSA_MASK == 0;
        if self.options.preferred == Precision::Double
            && (value as f32) as f64 != value
            && !narrow_mantissa
        {
            return Precision::Double;
        }
        if !fits_f15(value) {
            return Precision::Single;
        }
        if self.options.preferred == Precision::Half || narrow_mantissa {
            return Precision::Half;
        }
        Precision::Single
    }

    fn write_obj(&mut self, entries: &ObjectEntries, shapes: &mut ShapeDictionary) {
        if entries.is_empty() {
            self.writer.u8(SMALL_UNIQUE_OBJECT);
            return;
        }
        let Some(key) = shape_key(entries) else {
            return self.write_obj_hashtable(entries, shapes);
        };
        if let Some(entry) = shapes.get_mut(&key) {
            let index = entry.index;
            if index <= MAX_COMMON_OBJECT_ID {
                self.writer.u8(COMMON_OBJECT | index as u8);
            } else if index <= MAX_UNCOMMON_OBJECT_ID {
                self.writer.u8(UNCOMMON_OBJECT);
                self.writer.u8((index - UNCOMMON_INDEX_BASE) as u8);
            } else {
                self.writer.u8(RARE_OBJECT);
                self.writer.u16((index - RARE_INDEX_BASE) as u16);
            }
            // The first reference carries the key list.
            if !entry.used {
                entry.used = true;
                self.writer.buf(&key);
                self.writer.u8(TERMINATOR);
            }
        } else if entries.len() <= MAX_SMALL_UNIQUE_OBJECT_FIELDS {
            self.writer.u8(SMALL_UNIQUE_OBJECT | entries.len() as u8);
            self.writer.buf(&key);
        } else {
            self.writer.u8(LARGE_UNIQUE_OBJECT);
            self.writer.buf(&key);
            self.writer.u8(TERMINATOR);
        }
        let mut ordered: Vec<&(String, Value)> = entries.iter().collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, child) in ordered {
            self.write_any(child, shapes);
        }
    }

    /// Fallback for key sets the shape framing cannot carry: raw
    /// NUL-terminated keys, values in iteration order, the empty-key value
    /// (marked by an extra terminator) last.
    fn write_obj_hashtable(&mut self, entries: &ObjectEntries, shapes: &mut ShapeDictionary) {
        self.writer.u8(HASHTABLE);
        let mut has_empty = false;
        for (key, _) in entries {
            if key.is_empty() {
                has_empty = true;
                continue;
            }
            self.writer.buf(key.as_bytes());
            self.writer.u8(TERMINATOR);
        }
        if has_empty {
            self.writer.u8(TERMINATOR);
        }
        self.writer.u8(TERMINATOR);
        for (key, child) in entries {
            if !key.is_empty() {
                self.write_any(child, shapes);
            }
        }
        if has_empty {
            for (key, child) in entries {
                if key.is_empty() {
                    self.write_any(child, shapes);
                }
            }
        }
    }
}
