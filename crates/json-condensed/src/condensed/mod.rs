//! The Condensed binary codec.
//!
//! A self-describing stream of tagged values: a 5-bit-prefix tag system,
//! narrowing integer forms down to a single byte, a 15-bit float form, and
//! a per-payload dictionary that emits each repeated object shape's key
//! list only once. Writer output is byte-deterministic for a given tree.

pub mod constants;

mod decoder;
mod encoder;
mod error;
mod shape;

pub use decoder::CondensedDecoder;
pub use encoder::{CondensedEncoder, CondensedEncoderOptions};
pub use error::CondensedError;
pub use shape::{shape_key, ShapeDictionary, ShapeEntry};

use crate::value::Value;

/// Encode a [`Value`] into Condensed bytes.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut encoder = CondensedEncoder::new();
    encoder.encode(value)
}

/// Decode Condensed bytes into a [`Value`].
pub fn decode(data: &[u8]) -> Result<Value, CondensedError> {
    let mut decoder = CondensedDecoder::new();
    decoder.decode(data)
}
