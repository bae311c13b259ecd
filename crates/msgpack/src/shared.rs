//! One-shot convenience wrappers around the encoder and decoder.

use crate::{MsgPackDecoder, MsgPackEncoder, MsgPackError, PackOptions, PackValue, UnpackOptions};

/// Encode a [`PackValue`] into MessagePack bytes.
pub fn pack(value: &PackValue) -> Result<Vec<u8>, MsgPackError> {
    pack_with(value, PackOptions::default())
}

/// Encode a [`PackValue`] with explicit encoder options.
pub fn pack_with(value: &PackValue, options: PackOptions) -> Result<Vec<u8>, MsgPackError> {
    let mut encoder = MsgPackEncoder::with_options(options);
    encoder.encode(value)
}

/// Decode one [`PackValue`] from MessagePack bytes.
///
/// A truncated input fails with the transient
/// [`MsgPackError::InsufficientData`]; trailing bytes after the first
/// value are ignored.
pub fn unpack(bytes: &[u8]) -> Result<PackValue, MsgPackError> {
    unpack_with(bytes, UnpackOptions::default())
}

/// Decode one [`PackValue`] with explicit decoder options.
pub fn unpack_with(bytes: &[u8], options: UnpackOptions) -> Result<PackValue, MsgPackError> {
    let mut decoder = MsgPackDecoder::with_options(options);
    decoder.feed(bytes);
    decoder.unpack()
}
