//! Value access error type.

use thiserror::Error;

use super::Kind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected {expected} value, found {actual}")]
    TypeMismatch { expected: Kind, actual: Kind },
    #[error("key `{0}` not found")]
    KeyNotFound(String),
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
