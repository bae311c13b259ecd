//! MessagePack binary serialization.
//!
//! A compact, self-describing codec over a fixed value domain: nil,
//! booleans, 64-bit integers, IEEE floats, byte and text strings,
//! arrays, maps, and tagged extension values.
//!
//! - [`MsgPackEncoder`] serializes a [`PackValue`] with minimal-width
//!   headers, or emits container headers standalone for streaming
//!   construction.
//! - [`MsgPackDecoder`] incrementally reconstructs values from
//!   arbitrarily fragmented input chunks, enforcing configurable
//!   per-kind length limits and a nesting-depth bound.
//! - [`pack`] / [`unpack`] are one-shot wrappers for whole buffers.
//!
//! # Example
//!
//! ```
//! use msgpack_codec::{pack, MsgPackDecoder, MsgPackError, PackValue};
//!
//! let bytes = pack(&PackValue::Array(vec![
//!     PackValue::Int(1),
//!     PackValue::Str("two".into()),
//! ]))
//! .unwrap();
//!
//! // Feed the stream in two arbitrary chunks.
//! let mut decoder = MsgPackDecoder::new();
//! decoder.feed(&bytes[..2]);
//! assert_eq!(decoder.unpack(), Err(MsgPackError::InsufficientData));
//! decoder.feed(&bytes[2..]);
//! let value = decoder.unpack().unwrap();
//! assert_eq!(
//!     value,
//!     PackValue::Array(vec![PackValue::Int(1), PackValue::Str("two".into())])
//! );
//! ```

pub mod constants;

mod decoder;
mod encoder;
mod error;
mod ext;
mod options;
mod shared;
mod value;

pub use decoder::{MsgPackDecoder, Values};
pub use encoder::MsgPackEncoder;
pub use error::{ErrorKind, MsgPackError};
pub use ext::ExtRegistry;
pub use options::{PackOptions, UnpackLimits, UnpackOptions, Utf8Policy, DEFAULT_MAX_DEPTH};
pub use shared::{pack, pack_with, unpack, unpack_with};
pub use value::PackValue;
