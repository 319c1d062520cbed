//! JSON text codec error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonError {
    #[error("misspelled literal at byte {0}")]
    BadLiteral(usize),
    #[error("invalid number at byte {0}")]
    BadNumber(usize),
    #[error("expected `:` at byte {0}")]
    MissingColon(usize),
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),
    #[error("unexpected byte 0x{0:02x} at offset {1}")]
    UnexpectedByte(u8, usize),
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("invalid UTF-8 in string at byte {0}")]
    InvalidUtf8(usize),
}
