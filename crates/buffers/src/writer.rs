//! Binary buffer writer over an auto-growing byte vector.

/// A binary writer that appends big-endian encoded data to an owned,
/// growable buffer.
///
/// The buffer only ever grows; [`flush`](Writer::flush) hands the
/// accumulated bytes to the caller and leaves the writer empty, ready
/// for the next message.
pub struct Writer {
    out: Vec<u8>,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    /// Creates a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Discards all written bytes, keeping the allocation.
    pub fn reset(&mut self) {
        self.out.clear();
    }

    /// Returns the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.out)
    }

    /// Read-only view of the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.out
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.out.push(val);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.out.push(val as u8);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer (big-endian).
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 32-bit float (IEEE-754 big-endian).
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit float (IEEE-754 big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a raw byte slice.
    #[inline]
    pub fn buf(&mut self, data: &[u8]) {
        self.out.extend_from_slice(data);
    }

    /// Writes the UTF-8 bytes of a string.
    #[inline]
    pub fn utf8(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }
}
