//! `JsonDecoder` — permissive JSON text parser.

use crate::value::{upsert, Number, ObjectEntries, Value};

use super::error::JsonError;

/// Permissive JSON parser producing [`Value`] trees.
///
/// Commas are treated as whitespace, so they are optional separators and
/// extra ones are harmless. Failure is fatal: the whole parse aborts with
/// the offset of the offending byte.
pub struct JsonDecoder;

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode JSON text. Empty (or all-whitespace) input yields `Null`;
    /// trailing bytes after the root value are ignored.
    pub fn decode(&mut self, data: &[u8]) -> Result<Value, JsonError> {
        let mut parser = Parser { data, x: 0 };
        parser.skip_whitespace();
        if parser.at_end() {
            return Ok(Value::Null);
        }
        parser.parse_any()
    }
}

struct Parser<'a> {
    data: &'a [u8],
    x: usize,
}

impl Parser<'_> {
    fn at_end(&self) -> bool {
        self.x >= self.data.len()
    }

    /// Spaces, tabs, newlines and commas all count as whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.data.get(self.x) {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' | b',' => self.x += 1,
                _ => break,
            }
        }
    }

    /// Parses the value starting at the cursor. The caller has already
    /// skipped whitespace and checked for end of input.
    fn parse_any(&mut self) -> Result<Value, JsonError> {
        match self.data[self.x] {
            b'"' => {
                self.x += 1;
                Ok(Value::String(self.parse_string()?))
            }
            b't' => self.parse_keyword(b"true", Value::Bool(true)),
            b'f' => self.parse_keyword(b"false", Value::Bool(false)),
            b'n' => self.parse_keyword(b"null", Value::Null),
            b'-' | b'0'..=b'9' => self.parse_number(),
            b'{' => {
                self.x += 1;
                self.parse_object()
            }
            b'[' => {
                self.x += 1;
                self.parse_array()
            }
            other => Err(JsonError::UnexpectedByte(other, self.x)),
        }
    }

    fn parse_keyword(&mut self, word: &[u8], value: Value) -> Result<Value, JsonError> {
        let start = self.x;
        for &expected in word {
            if self.data.get(self.x) != Some(&expected) {
                return Err(JsonError::BadLiteral(start));
            }
            self.x += 1;
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Value, JsonError> {
        let start = self.x;
        while let Some(byte) = self.data.get(self.x) {
            match byte {
                b'-' | b'+' | b'.' | b'e' | b'E' | b'0'..=b'9' => self.x += 1,
                _ => break,
            }
        }
        // The charset is pure ASCII, so the slice is valid UTF-8.
        let text = std::str::from_utf8(&self.data[start..self.x])
            .map_err(|_| JsonError::BadNumber(start))?;
        let parsed: f64 = text.parse().map_err(|_| JsonError::BadNumber(start))?;
        Ok(Value::Number(Number::new(parsed)))
    }

    /// Reads string contents after the opening quote.
    fn parse_string(&mut self) -> Result<String, JsonError> {
        let start = self.x;
        let mut out: Vec<u8> = Vec::new();
        while self.x < self.data.len() {
            match self.data[self.x] {
                b'"' => {
                    self.x += 1;
                    return String::from_utf8(out).map_err(|_| JsonError::InvalidUtf8(start));
                }
                b'\\' => {
                    let Some(&escaped) = self.data.get(self.x + 1) else {
                        return Err(JsonError::UnterminatedString(start));
                    };
                    match escaped {
                        b'"' => out.push(b'"'),
                        b'\\' => out.push(b'\\'),
                        b'/' => out.push(b'/'),
                        b'n' => out.push(b'\n'),
                        // Unknown escapes pass through verbatim.
                        other => {
                            out.push(b'\\');
                            out.push(other);
                        }
                    }
                    self.x += 2;
                }
                // Legacy quote digraph emitted by the historic printer.
                b'/' if self.data.get(self.x + 1) == Some(&b'"') => {
                    out.push(b'"');
                    self.x += 2;
                }
                other => {
                    out.push(other);
                    self.x += 1;
                }
            }
        }
        Err(JsonError::UnterminatedString(start))
    }

    fn parse_object(&mut self) -> Result<Value, JsonError> {
        let mut entries: ObjectEntries = Vec::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Err(JsonError::UnexpectedEnd(self.x));
            }
            match self.data[self.x] {
                b'}' => {
                    self.x += 1;
                    return Ok(Value::Object(entries));
                }
                b'"' => {
                    self.x += 1;
                    let key = self.parse_string()?;
                    self.skip_whitespace();
                    if self.at_end() {
                        return Err(JsonError::UnexpectedEnd(self.x));
                    }
                    if self.data[self.x] != b':' {
                        return Err(JsonError::MissingColon(self.x));
                    }
                    self.x += 1;
                    self.skip_whitespace();
                    if self.at_end() {
                        return Err(JsonError::UnexpectedEnd(self.x));
                    }
                    let value = self.parse_any()?;
                    upsert(&mut entries, key, value);
                }
                other => return Err(JsonError::UnexpectedByte(other, self.x)),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, JsonError> {
        let mut elements = Vec::new();
        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Err(JsonError::UnexpectedEnd(self.x));
            }
            if self.data[self.x] == b']' {
                self.x += 1;
                return Ok(Value::Array(elements));
            }
            elements.push(self.parse_any()?);
        }
    }
}
