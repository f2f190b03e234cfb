//! Cell codec error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid cell tag {0:#04x}")]
    InvalidTag(u8),
    #[error("invalid type code {0:#04x}")]
    InvalidTypeCode(u8),
    #[error("invalid utf-8 in string cell")]
    InvalidUtf8,
    #[error("deferred cell requires a blob store")]
    NoBlobStore,
}
