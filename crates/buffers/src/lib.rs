//! Binary buffer utilities for json-condensed.
//!
//! This crate provides the byte-level reading and writing primitives the
//! Condensed codec is built on.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//! - [`encode_f15`] / [`decode_f15`] - The 15-bit float form used on the wire
//!
//! # Example
//!
//! ```
//! use json_condensed_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16_le(0x0203);
//! let data = writer.flush();
//! assert_eq!(data, [0x01, 0x03, 0x02]);
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), 0x01);
//! assert_eq!(reader.u16_le(), 0x0203);
//! ```

mod f15;
mod reader;
mod writer;

pub use f15::{decode_f15, encode_f15, fits_f15, F15_MAX, F15_MIN_POSITIVE};
pub use reader::Reader;
pub use writer::Writer;
