//! MessagePack codec error type.

use thiserror::Error;

/// Coarse error category.
///
/// Every [`MsgPackError`] variant maps to exactly one category; callers
/// that only need transient-vs-permanent matching test the category
/// instead of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Integer outside the [-2^63, 2^64-1] domain at construction.
    Overflow,
    /// A declared length or count exceeds the structural 2^32-1 ceiling
    /// or a configured limit.
    Value,
    /// A value has no MessagePack representation.
    Type,
    /// Malformed wire data or inconsistent decode state.
    Format,
    /// More fed bytes are needed; the only retryable category.
    InsufficientData,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MsgPackError {
    #[error("integer outside the [-2^63, 2^64-1] range")]
    Overflow,
    #[error("{what} length does not fit in 32 bits")]
    LengthOverflow { what: &'static str },
    #[error("{what} length {len} exceeds configured maximum {max}")]
    LimitExceeded {
        what: &'static str,
        len: u32,
        max: u32,
    },
    #[error("container nesting exceeds maximum depth {max}")]
    DepthLimitExceeded { max: usize },
    #[error("value has no MessagePack representation")]
    UnsupportedType,
    #[error("invalid MessagePack byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { byte: u8, offset: u64 },
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,
    #[error("insufficient data to complete the current value")]
    InsufficientData,
}

impl MsgPackError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MsgPackError::Overflow => ErrorKind::Overflow,
            MsgPackError::LengthOverflow { .. }
            | MsgPackError::LimitExceeded { .. }
            | MsgPackError::DepthLimitExceeded { .. } => ErrorKind::Value,
            MsgPackError::UnsupportedType => ErrorKind::Type,
            MsgPackError::InvalidByte { .. } | MsgPackError::InvalidUtf8 => ErrorKind::Format,
            MsgPackError::InsufficientData => ErrorKind::InsufficientData,
        }
    }

    /// `true` only for [`MsgPackError::InsufficientData`]: feed more
    /// bytes and retry. All other errors are permanent.
    pub fn is_transient(&self) -> bool {
        matches!(self, MsgPackError::InsufficientData)
    }
}

impl From<msgpack_buffers::BufferError> for MsgPackError {
    fn from(err: msgpack_buffers::BufferError) -> Self {
        match err {
            msgpack_buffers::BufferError::EndOfBuffer => MsgPackError::InsufficientData,
        }
    }
}
