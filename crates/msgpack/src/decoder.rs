//! Streaming MessagePack decoder.
//!
//! The decoder is a suspend/resume state machine, not a recursive-descent
//! parser: nested containers live on an explicit frame stack, so decode
//! depth is bounded by configuration rather than by the call stack, and a
//! value spanning many [`feed`](MsgPackDecoder::feed) calls resumes where
//! it left off instead of re-parsing from the start.

use msgpack_buffers::StreamingReader;

use crate::constants::*;
use crate::{MsgPackError, PackValue, UnpackOptions, Utf8Policy};

/// An open container whose elements are still being decoded.
enum Frame {
    Array {
        remaining: u32,
        items: Vec<PackValue>,
    },
    Map {
        remaining: u32,
        entries: Vec<(PackValue, PackValue)>,
        key: Option<PackValue>,
    },
}

/// Outcome of reading one wire atom.
enum Step {
    /// A complete value (scalar, str/bin/ext payload, or empty container).
    Value(PackValue),
    /// A container header; a frame was pushed for its elements.
    Opened,
}

/// Streaming MessagePack decoder.
///
/// [`feed`](Self::feed) appends raw chunks, [`unpack`](Self::unpack)
/// drains one top-level value at a time. When the buffered bytes do not
/// complete the next value, `unpack` fails with the transient
/// [`MsgPackError::InsufficientData`] and can be retried after feeding
/// more; any other error is permanent and poisons the decoder.
pub struct MsgPackDecoder {
    reader: StreamingReader,
    stack: Vec<Frame>,
    options: UnpackOptions,
    poisoned: Option<MsgPackError>,
}

impl Default for MsgPackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self::with_options(UnpackOptions::default())
    }

    pub fn with_options(options: UnpackOptions) -> Self {
        Self {
            reader: StreamingReader::new(),
            stack: Vec::new(),
            options,
            poisoned: None,
        }
    }

    /// Appends a chunk to the input buffer. Never parses.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.reader.push(chunk);
    }

    /// Total bytes consumed since construction, including bytes of
    /// elements inside a still-open container.
    pub fn bytes_consumed(&self) -> u64 {
        self.reader.total_read()
    }

    /// Attempts to drain one top-level value from the buffered bytes.
    pub fn unpack(&mut self) -> Result<PackValue, MsgPackError> {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        loop {
            match self.read_one() {
                Ok(Step::Opened) => {}
                Ok(Step::Value(value)) => {
                    if let Some(done) = self.complete(value) {
                        self.reader.consume();
                        return Ok(done);
                    }
                }
                Err(MsgPackError::InsufficientData) => {
                    return Err(MsgPackError::InsufficientData)
                }
                Err(err) => {
                    self.poisoned = Some(err.clone());
                    return Err(err);
                }
            }
        }
    }

    /// Iterates over the top-level values decodable from the bytes fed
    /// so far. Ends when more data is needed; a permanent error is
    /// yielded as the final item.
    pub fn iter(&mut self) -> Values<'_> {
        Values {
            decoder: self,
            done: false,
        }
    }

    /// Feeds a finished value into the innermost open container,
    /// returning it as the top-level result when the stack is empty.
    fn complete(&mut self, value: PackValue) -> Option<PackValue> {
        let mut value = value;
        loop {
            match self.stack.last_mut() {
                None => return Some(value),
                Some(Frame::Array { remaining, items }) => {
                    items.push(value);
                    *remaining -= 1;
                    if *remaining > 0 {
                        return None;
                    }
                }
                Some(Frame::Map {
                    remaining,
                    entries,
                    key,
                }) => match key.take() {
                    None => {
                        *key = Some(value);
                        return None;
                    }
                    Some(k) => {
                        entries.push((k, value));
                        *remaining -= 1;
                        if *remaining > 0 {
                            return None;
                        }
                    }
                },
            }
            // Innermost container finished; pop it and bubble up.
            value = match self.stack.pop() {
                Some(Frame::Array { items, .. }) => PackValue::Array(items),
                Some(Frame::Map { entries, .. }) => PackValue::Map(entries),
                None => unreachable!(),
            };
        }
    }

    /// Reads one wire atom all-or-nothing: on insufficient data the
    /// cursor is restored so the atom is re-read whole on the next call.
    fn read_one(&mut self) -> Result<Step, MsgPackError> {
        let start = self.reader.x();
        match self.read_atom() {
            Err(MsgPackError::InsufficientData) => {
                self.reader.set_x(start);
                Err(MsgPackError::InsufficientData)
            }
            other => other,
        }
    }

    fn read_atom(&mut self) -> Result<Step, MsgPackError> {
        let offset = self.reader.total_read();
        let tag = self.reader.u8()?;
        match tag {
            0x00..=0x7f => Ok(Step::Value(PackValue::UInt(tag as u64))),
            0x80..=0x8f => self.open_map((tag & 0x0f) as u32),
            0x90..=0x9f => self.open_array((tag & 0x0f) as u32),
            0xa0..=0xbf => self.read_str((tag & 0x1f) as u32),
            NIL => Ok(Step::Value(PackValue::Nil)),
            FALSE => Ok(Step::Value(PackValue::Bool(false))),
            TRUE => Ok(Step::Value(PackValue::Bool(true))),
            BIN8 => {
                let len = self.reader.u8()? as u32;
                self.read_bin(len)
            }
            BIN16 => {
                let len = self.reader.u16()? as u32;
                self.read_bin(len)
            }
            BIN32 => {
                let len = self.reader.u32()?;
                self.read_bin(len)
            }
            EXT8 => {
                let len = self.reader.u8()? as u32;
                self.read_ext(len)
            }
            EXT16 => {
                let len = self.reader.u16()? as u32;
                self.read_ext(len)
            }
            EXT32 => {
                let len = self.reader.u32()?;
                self.read_ext(len)
            }
            FLOAT32 => Ok(Step::Value(PackValue::Float32(self.reader.f32()?))),
            FLOAT64 => Ok(Step::Value(PackValue::Float64(self.reader.f64()?))),
            UINT8 => Ok(Step::Value(PackValue::UInt(self.reader.u8()? as u64))),
            UINT16 => Ok(Step::Value(PackValue::UInt(self.reader.u16()? as u64))),
            UINT32 => Ok(Step::Value(PackValue::UInt(self.reader.u32()? as u64))),
            UINT64 => Ok(Step::Value(PackValue::UInt(self.reader.u64()?))),
            INT8 => Ok(Step::Value(PackValue::Int(self.reader.i8()? as i64))),
            INT16 => Ok(Step::Value(PackValue::Int(self.reader.i16()? as i64))),
            INT32 => Ok(Step::Value(PackValue::Int(self.reader.i32()? as i64))),
            INT64 => Ok(Step::Value(PackValue::Int(self.reader.i64()?))),
            FIXEXT1 => self.read_ext(1),
            FIXEXT2 => self.read_ext(2),
            FIXEXT4 => self.read_ext(4),
            FIXEXT8 => self.read_ext(8),
            FIXEXT16 => self.read_ext(16),
            STR8 => {
                let len = self.reader.u8()? as u32;
                self.read_str(len)
            }
            STR16 => {
                let len = self.reader.u16()? as u32;
                self.read_str(len)
            }
            STR32 => {
                let len = self.reader.u32()?;
                self.read_str(len)
            }
            ARRAY16 => {
                let n = self.reader.u16()? as u32;
                self.open_array(n)
            }
            ARRAY32 => {
                let n = self.reader.u32()?;
                self.open_array(n)
            }
            MAP16 => {
                let n = self.reader.u16()? as u32;
                self.open_map(n)
            }
            MAP32 => {
                let n = self.reader.u32()?;
                self.open_map(n)
            }
            0xe0..=0xff => Ok(Step::Value(PackValue::Int((tag as i8) as i64))),
            NEVER_USED => Err(MsgPackError::InvalidByte { byte: tag, offset }),
        }
    }

    fn check_limit(
        what: &'static str,
        len: u32,
        limit: Option<u32>,
    ) -> Result<(), MsgPackError> {
        match limit {
            Some(max) if len > max => Err(MsgPackError::LimitExceeded { what, len, max }),
            _ => Ok(()),
        }
    }

    fn read_str(&mut self, len: u32) -> Result<Step, MsgPackError> {
        Self::check_limit("str", len, self.options.limits.max_str_len)?;
        let bytes = self.reader.buf(len as usize)?;
        if self.options.raw_mode {
            return Ok(Step::Value(PackValue::Bin(bytes)));
        }
        let s = match self.options.utf8 {
            Utf8Policy::Strict => {
                String::from_utf8(bytes).map_err(|_| MsgPackError::InvalidUtf8)?
            }
            Utf8Policy::Replace => String::from_utf8_lossy(&bytes).into_owned(),
        };
        Ok(Step::Value(PackValue::Str(s)))
    }

    fn read_bin(&mut self, len: u32) -> Result<Step, MsgPackError> {
        Self::check_limit("bin", len, self.options.limits.max_bin_len)?;
        let bytes = self.reader.buf(len as usize)?;
        Ok(Step::Value(PackValue::Bin(bytes)))
    }

    fn read_ext(&mut self, len: u32) -> Result<Step, MsgPackError> {
        Self::check_limit("ext", len, self.options.limits.max_ext_len)?;
        let tag = self.reader.i8()?;
        let payload = self.reader.buf(len as usize)?;
        Ok(Step::Value(self.options.registry.resolve(tag, payload)))
    }

    fn open_array(&mut self, n: u32) -> Result<Step, MsgPackError> {
        Self::check_limit("array", n, self.options.limits.max_array_len)?;
        if n == 0 {
            return Ok(Step::Value(PackValue::Array(Vec::new())));
        }
        self.push_frame(Frame::Array {
            remaining: n,
            items: Vec::new(),
        })
    }

    fn open_map(&mut self, n: u32) -> Result<Step, MsgPackError> {
        Self::check_limit("map", n, self.options.limits.max_map_len)?;
        if n == 0 {
            return Ok(Step::Value(PackValue::Map(Vec::new())));
        }
        self.push_frame(Frame::Map {
            remaining: n,
            entries: Vec::new(),
            key: None,
        })
    }

    fn push_frame(&mut self, frame: Frame) -> Result<Step, MsgPackError> {
        let max = self.options.depth_bound();
        if self.stack.len() >= max {
            return Err(MsgPackError::DepthLimitExceeded { max });
        }
        self.stack.push(frame);
        Ok(Step::Opened)
    }
}

/// Iterator over the top-level values currently decodable from a
/// [`MsgPackDecoder`]. Returned by [`MsgPackDecoder::iter`].
pub struct Values<'a> {
    decoder: &'a mut MsgPackDecoder,
    done: bool,
}

impl Iterator for Values<'_> {
    type Item = Result<PackValue, MsgPackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.unpack() {
            Ok(value) => Some(Ok(value)),
            Err(err) if err.is_transient() => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
