//! MessagePack encoder.

use msgpack_buffers::Writer;

use crate::constants::*;
use crate::{MsgPackError, PackOptions, PackValue};

fn header_len(len: usize, what: &'static str) -> Result<u32, MsgPackError> {
    u32::try_from(len).map_err(|_| MsgPackError::LengthOverflow { what })
}

/// MessagePack encoder.
///
/// Appends wire bytes to an internal buffer via [`pack`](Self::pack) and
/// the header-only streaming calls; [`finish`](Self::finish) hands the
/// buffer to the caller. Every value is encoded with the minimal-width
/// header that exactly represents it.
pub struct MsgPackEncoder {
    pub writer: Writer,
    options: PackOptions,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self::with_options(PackOptions::default())
    }

    pub fn with_options(options: PackOptions) -> Self {
        Self {
            writer: Writer::new(),
            options,
        }
    }

    /// Encodes one value and returns its bytes, discarding any bytes
    /// previously appended with [`pack`](Self::pack).
    pub fn encode(&mut self, value: &PackValue) -> Result<Vec<u8>, MsgPackError> {
        self.writer.reset();
        self.pack(value)?;
        Ok(self.writer.flush())
    }

    /// Encodes a JSON value through the [`PackValue`] conversion.
    pub fn encode_json(&mut self, value: &serde_json::Value) -> Result<Vec<u8>, MsgPackError> {
        self.encode(&PackValue::from(value.clone()))
    }

    /// Appends the encoding of `value` to the buffer.
    pub fn pack(&mut self, value: &PackValue) -> Result<(), MsgPackError> {
        match value {
            PackValue::Nil => self.writer.u8(NIL),
            PackValue::Bool(b) => self.writer.u8(if *b { TRUE } else { FALSE }),
            PackValue::Int(i) => self.write_integer(*i),
            PackValue::UInt(u) => self.write_u_integer(*u),
            PackValue::Float32(f) => {
                self.writer.u8(FLOAT32);
                self.writer.f32(*f);
            }
            PackValue::Float64(f) => {
                self.writer.u8(FLOAT64);
                self.writer.f64(*f);
            }
            PackValue::Str(s) => self.write_str(s)?,
            PackValue::Bin(b) => self.write_bin(b)?,
            PackValue::Array(arr) => {
                self.pack_array_header(arr.len())?;
                for item in arr {
                    self.pack(item)?;
                }
            }
            PackValue::Map(entries) => {
                self.pack_map_header(entries.len())?;
                for (key, val) in entries {
                    self.pack(key)?;
                    self.pack(val)?;
                }
            }
            PackValue::Ext(tag, payload) => self.pack_ext(*tag, payload)?,
        }
        Ok(())
    }

    /// Emits only the header for an array of `n` elements; the caller
    /// then packs `n` values as the elements.
    pub fn pack_array_header(&mut self, n: usize) -> Result<(), MsgPackError> {
        let n = header_len(n, "array")?;
        if n <= FIXCONTAINER_MAX_LEN {
            self.writer.u8(FIXARRAY_PREFIX | n as u8);
        } else if n <= 0xffff {
            self.writer.u8(ARRAY16);
            self.writer.u16(n as u16);
        } else {
            self.writer.u8(ARRAY32);
            self.writer.u32(n);
        }
        Ok(())
    }

    /// Emits only the header for a map of `n` pairs; the caller then
    /// packs `2 * n` values as alternating keys and values.
    pub fn pack_map_header(&mut self, n: usize) -> Result<(), MsgPackError> {
        let n = header_len(n, "map")?;
        if n <= FIXCONTAINER_MAX_LEN {
            self.writer.u8(FIXMAP_PREFIX | n as u8);
        } else if n <= 0xffff {
            self.writer.u8(MAP16);
            self.writer.u16(n as u16);
        } else {
            self.writer.u8(MAP32);
            self.writer.u32(n);
        }
        Ok(())
    }

    /// Emits an extension value: header, signed tag byte, payload.
    pub fn pack_ext(&mut self, tag: i8, payload: &[u8]) -> Result<(), MsgPackError> {
        let len = header_len(payload.len(), "ext")?;
        match len {
            1 => self.writer.u8(FIXEXT1),
            2 => self.writer.u8(FIXEXT2),
            4 => self.writer.u8(FIXEXT4),
            8 => self.writer.u8(FIXEXT8),
            16 => self.writer.u8(FIXEXT16),
            _ if len <= 0xff => {
                self.writer.u8(EXT8);
                self.writer.u8(len as u8);
            }
            _ if len <= 0xffff => {
                self.writer.u8(EXT16);
                self.writer.u16(len as u16);
            }
            _ => {
                self.writer.u8(EXT32);
                self.writer.u32(len);
            }
        }
        self.writer.i8(tag);
        self.writer.buf(payload);
        Ok(())
    }

    /// Returns all appended bytes, resetting the encoder.
    pub fn finish(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -32 {
            self.writer.u8(int as u8);
        } else if int >= i8::MIN as i64 {
            self.writer.u8(INT8);
            self.writer.i8(int as i8);
        } else if int >= i16::MIN as i64 {
            self.writer.u8(INT16);
            self.writer.i16(int as i16);
        } else if int >= i32::MIN as i64 {
            self.writer.u8(INT32);
            self.writer.i32(int as i32);
        } else {
            self.writer.u8(INT64);
            self.writer.i64(int);
        }
    }

    fn write_u_integer(&mut self, uint: u64) {
        if uint <= POS_FIXINT_MAX as u64 {
            self.writer.u8(uint as u8);
        } else if uint <= 0xff {
            self.writer.u8(UINT8);
            self.writer.u8(uint as u8);
        } else if uint <= 0xffff {
            self.writer.u8(UINT16);
            self.writer.u16(uint as u16);
        } else if uint <= 0xffff_ffff {
            self.writer.u8(UINT32);
            self.writer.u32(uint as u32);
        } else {
            self.writer.u8(UINT64);
            self.writer.u64(uint);
        }
    }

    fn write_str(&mut self, s: &str) -> Result<(), MsgPackError> {
        let len = header_len(s.len(), "str")?;
        self.write_str_header(len);
        self.writer.utf8(s);
        Ok(())
    }

    fn write_str_header(&mut self, len: u32) {
        if len <= FIXSTR_MAX_LEN {
            self.writer.u8(FIXSTR_PREFIX | len as u8);
        } else if len <= 0xff && self.options.use_bin_type {
            // str8 does not exist in the legacy wire format
            self.writer.u8(STR8);
            self.writer.u8(len as u8);
        } else if len <= 0xffff {
            self.writer.u8(STR16);
            self.writer.u16(len as u16);
        } else {
            self.writer.u8(STR32);
            self.writer.u32(len);
        }
    }

    fn write_bin(&mut self, buf: &[u8]) -> Result<(), MsgPackError> {
        let len = header_len(buf.len(), "bin")?;
        if self.options.use_bin_type {
            if len <= 0xff {
                self.writer.u8(BIN8);
                self.writer.u8(len as u8);
            } else if len <= 0xffff {
                self.writer.u8(BIN16);
                self.writer.u16(len as u16);
            } else {
                self.writer.u8(BIN32);
                self.writer.u32(len);
            }
        } else {
            // Legacy interoperability: byte strings share the str family
            self.write_str_header(len);
        }
        self.writer.buf(buf);
        Ok(())
    }
}
