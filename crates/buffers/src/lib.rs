//! Binary buffer utilities for msgpack-codec.
//!
//! - [`Writer`] - Appends binary data to an auto-growing buffer
//! - [`StreamingReader`] - Reads binary data from incrementally fed chunks
//!
//! All multi-byte reads and writes are big-endian. Reads are fallible:
//! when fewer bytes are buffered than a read needs, the read returns
//! [`BufferError::EndOfBuffer`] and leaves the cursor untouched, so a
//! caller can retry after feeding more data.
//!
//! # Example
//!
//! ```
//! use msgpack_buffers::{StreamingReader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! let data = writer.flush();
//!
//! let mut reader = StreamingReader::new();
//! reader.push(&data);
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.u16(), Ok(0x0203));
//! ```

mod streaming_reader;
mod writer;

pub use streaming_reader::StreamingReader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffered data.
    EndOfBuffer,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
        }
    }
}

impl std::error::Error for BufferError {}
