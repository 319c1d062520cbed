//! JSON-compatible value model with a compact self-describing binary
//! encoding.
//!
//! Three tightly coupled parts:
//!
//! - [`Value`] - a tagged union over null, bool, number, string, array and
//!   object. Numbers are IEEE 754 doubles; integer-ness lives on the wire,
//!   not in the model.
//! - The Condensed codec ([`encode_condensed`] / [`decode_condensed`]) - a
//!   binary form exploiting object-shape repetition, integer narrowing and
//!   a 15-bit float, producing byte-identical output across runs.
//! - The JSON text codec ([`encode_text`] / [`decode_text`]) - a permissive
//!   parser (commas are whitespace) and a tab-indented pretty printer.
//!
//! ```
//! use json_condensed::{decode_condensed, encode_condensed, decode_text};
//!
//! let value = decode_text("{\"on\": true, \"count\": 3}").unwrap();
//! let bytes = encode_condensed(&value);
//! assert_eq!(decode_condensed(&bytes).unwrap(), value);
//! ```

pub mod condensed;
pub mod convert;
pub mod json;
pub mod value;

pub use condensed::{
    CondensedDecoder, CondensedEncoder, CondensedEncoderOptions, CondensedError, ShapeDictionary,
};
pub use json::{JsonDecoder, JsonEncoder, JsonError};
pub use value::{Kind, Number, ObjectEntries, Precision, Value, ValueError};

/// Encodes a value into Condensed bytes with default options.
pub fn encode_condensed(value: &Value) -> Vec<u8> {
    condensed::encode(value)
}

/// Decodes Condensed bytes into a value.
pub fn decode_condensed(data: &[u8]) -> Result<Value, CondensedError> {
    condensed::decode(data)
}

/// Pretty-prints a value as JSON text.
pub fn encode_text(value: &Value) -> String {
    JsonEncoder::new().encode_to_string(value)
}

/// Parses JSON text into a value.
pub fn decode_text(text: &str) -> Result<Value, JsonError> {
    JsonDecoder::new().decode(text.as_bytes())
}
