//! `JsonEncoder` — pretty printer for [`Value`] trees.

use json_condensed_buffers::Writer;

use crate::value::{Number, Value};

/// Pretty printer emitting tab-indented multi-line JSON.
///
/// Strings are quoted with the standard `\"`, `\\` and `\n` escapes; `/` is
/// additionally escaped as `\/` so that output never contains the legacy
/// `/"` digraph the parser accepts. Object pairs print in insertion order.
pub struct JsonEncoder {
    pub writer: Writer,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encode a value and return the JSON text as bytes.
    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value, 0);
        self.writer.flush()
    }

    /// Encode a value and return the JSON text as a string.
    pub fn encode_to_string(&mut self, value: &Value) -> String {
        String::from_utf8(self.encode(value)).unwrap_or_default()
    }

    fn write_any(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.writer.utf8("null"),
            Value::Bool(true) => self.writer.utf8("true"),
            Value::Bool(false) => self.writer.utf8("false"),
            Value::Number(n) => self.write_number(n),
            Value::String(s) => self.write_string(s),
            Value::Array(elements) => self.write_array(elements, depth),
            Value::Object(entries) => self.write_object(entries, depth),
        }
    }

    fn write_number(&mut self, number: &Number) {
        let formatted = number.value.to_string();
        self.writer.utf8(&formatted);
        // A number decoded from a sized float tag keeps a visible decimal
        // point even when it happens to be integral.
        if number.hint.is_some() && !formatted.contains(['.', 'e', 'E']) {
            self.writer.utf8(".0");
        }
    }

    fn write_string(&mut self, s: &str) {
        self.writer.u8(b'"');
        for &byte in s.as_bytes() {
            match byte {
                b'"' => self.writer.buf(b"\\\""),
                b'\\' => self.writer.buf(b"\\\\"),
                b'/' => self.writer.buf(b"\\/"),
                b'\n' => self.writer.buf(b"\\n"),
                other => self.writer.u8(other),
            }
        }
        self.writer.u8(b'"');
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.writer.u8(b'\t');
        }
    }

    fn write_array(&mut self, elements: &[Value], depth: usize) {
        if elements.is_empty() {
            self.writer.utf8("[]");
            return;
        }
        self.writer.u8(b'[');
        for element in elements {
            self.writer.u8(b'\n');
            self.indent(depth + 1);
            self.write_any(element, depth + 1);
        }
        self.writer.u8(b'\n');
        self.indent(depth);
        self.writer.u8(b']');
    }

    fn write_object(&mut self, entries: &[(String, Value)], depth: usize) {
        if entries.is_empty() {
            self.writer.utf8("{}");
            return;
        }
        self.writer.u8(b'{');
        self.writer.u8(b'\n');
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                self.writer.buf(b",\n");
            }
            self.indent(depth + 1);
            self.write_string(key);
            self.writer.buf(b": ");
            self.write_any(value, depth + 1);
        }
        self.writer.u8(b'\n');
        self.indent(depth);
        self.writer.u8(b'}');
    }
}
