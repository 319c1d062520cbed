//! Condensed codec error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CondensedError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("tag 0x{0:02x} belongs to a newer format revision")]
    VersionTooLow(u8),
    #[error("reserved tag 0x{0:02x}")]
    ReservedTag(u8),
    #[error("unknown tag 0x{0:02x} at offset {1}")]
    UnknownTag(u8, usize),
    #[error("unexpected terminator at offset {0}")]
    UnexpectedTerminator(usize),
    #[error("shape index {0} referenced without a definition")]
    InvalidShapeRef(usize),
    #[error("invalid UTF-8 in string at offset {0}")]
    InvalidUtf8(usize),
}
