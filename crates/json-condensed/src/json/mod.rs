//! JSON text codec: a permissive parser and a pretty printer.
//!
//! The parser treats commas as whitespace and accepts the legacy `/"`
//! quote digraph alongside standard escapes. The printer emits
//! tab-indented multi-line JSON with `\"` quoting; see the compatibility
//! notes in the repository README for the differences from the historic
//! emitter.

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;
pub use error::JsonError;
