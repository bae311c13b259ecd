//! Streaming reader over incrementally fed chunks.

use crate::BufferError;

/// A reader over a growing buffer of pushed chunks.
///
/// Chunks are appended with [`push`](StreamingReader::push) and read back
/// incrementally. Every read is fallible: if fewer bytes are buffered than
/// the read needs it returns [`BufferError::EndOfBuffer`] without moving
/// the cursor, so the caller can push more data and retry.
///
/// The cursor can be saved and restored via [`x`](StreamingReader::x) /
/// [`set_x`](StreamingReader::set_x) to make multi-byte parse steps
/// all-or-nothing. Once a region has been fully parsed,
/// [`consume`](StreamingReader::consume) lets the reader reclaim the
/// memory of the already-read prefix.
pub struct StreamingReader {
    data: Vec<u8>,
    x: usize,
    /// Bytes dropped from the front of `data` by `consume` so far.
    discarded: u64,
}

impl Default for StreamingReader {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingReader {
    /// Creates a new empty streaming reader.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            x: 0,
            discarded: 0,
        }
    }

    /// Appends a chunk of data to be read.
    pub fn push(&mut self, chunk: &[u8]) {
        self.data.extend_from_slice(chunk);
    }

    /// Number of bytes remaining to be read.
    pub fn size(&self) -> usize {
        self.data.len() - self.x
    }

    /// Current cursor position, relative to the retained buffer.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Restores the cursor to a previously saved position.
    ///
    /// Only positions obtained from [`x`](StreamingReader::x) since the
    /// last [`consume`](StreamingReader::consume) are valid.
    pub fn set_x(&mut self, x: usize) {
        debug_assert!(x <= self.data.len());
        self.x = x;
    }

    /// Total bytes read since creation, including consumed prefixes.
    pub fn total_read(&self) -> u64 {
        self.discarded + self.x as u64
    }

    /// Marks everything before the cursor as consumed, allowing the
    /// reader to reclaim that memory.
    ///
    /// Compaction is amortized: the prefix is only dropped once it is
    /// large in absolute terms or relative to the retained buffer.
    pub fn consume(&mut self) {
        if self.x == 0 {
            return;
        }
        if self.x == self.data.len() {
            self.discarded += self.x as u64;
            self.data.clear();
            self.x = 0;
            return;
        }
        if self.x >= 8192 || self.x * 2 >= self.data.len() {
            self.discarded += self.x as u64;
            self.data.drain(..self.x);
            self.x = 0;
        }
    }

    fn check(&self, n: usize) -> Result<(), BufferError> {
        if self.size() < n {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Peeks at the next byte without advancing.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.data[self.x])
    }

    /// Skips the given number of bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), BufferError> {
        self.check(n)?;
        self.x += n;
        Ok(())
    }

    /// Reads `n` bytes into a new vector.
    pub fn buf(&mut self, n: usize) -> Result<Vec<u8>, BufferError> {
        self.check(n)?;
        let out = self.data[self.x..self.x + n].to_vec();
        self.x += n;
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a signed 8-bit integer.
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.u8()? as i8)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.check(2)?;
        let val = u16::from_be_bytes([self.data[self.x], self.data[self.x + 1]]);
        self.x += 2;
        Ok(val)
    }

    /// Reads a signed 16-bit integer (big-endian).
    pub fn i16(&mut self) -> Result<i16, BufferError> {
        Ok(self.u16()? as i16)
    }

    /// Reads an unsigned 32-bit integer (big-endian).
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        self.check(4)?;
        let x = self.x;
        let val = u32::from_be_bytes([
            self.data[x],
            self.data[x + 1],
            self.data[x + 2],
            self.data[x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads a signed 32-bit integer (big-endian).
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        Ok(self.u32()? as i32)
    }

    /// Reads an unsigned 64-bit integer (big-endian).
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        self.check(8)?;
        let x = self.x;
        let val = u64::from_be_bytes([
            self.data[x],
            self.data[x + 1],
            self.data[x + 2],
            self.data[x + 3],
            self.data[x + 4],
            self.data[x + 5],
            self.data[x + 6],
            self.data[x + 7],
        ]);
        self.x += 8;
        Ok(val)
    }

    /// Reads a signed 64-bit integer (big-endian).
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        Ok(self.u64()? as i64)
    }

    /// Reads a 32-bit float (IEEE-754 big-endian).
    pub fn f32(&mut self) -> Result<f32, BufferError> {
        Ok(f32::from_bits(self.u32()?))
    }

    /// Reads a 64-bit float (IEEE-754 big-endian).
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        Ok(f64::from_bits(self.u64()?))
    }
}
