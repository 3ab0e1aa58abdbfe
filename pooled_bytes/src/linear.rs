//! Forward-growing pooled stream.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use crate::buffer::{Anchor, MAX_LEN, PooledBuffer, seek_target};
use crate::pool::{ArrayPool, SharedPool};
use crate::StreamError;

/// A pool-backed stream whose data starts at index 0 and grows forward.
///
/// # Examples
///
/// ```
/// use std::io::{Read, Seek, SeekFrom, Write};
/// use pooled_bytes::LinearStream;
///
/// let mut stream = LinearStream::new();
/// stream.write_all(b"hello world").unwrap();
/// assert_eq!(stream.as_bytes().unwrap(), b"hello world");
///
/// stream.seek(SeekFrom::Start(6)).unwrap();
/// let mut word = String::new();
/// stream.read_to_string(&mut word).unwrap();
/// assert_eq!(word, "world");
/// ```
#[derive(Debug)]
pub struct LinearStream {
    buf: PooledBuffer,
}

impl LinearStream {
    /// Creates a stream on the global pool with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(SharedPool::global().config().initial_stream_capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LinearStream {
            buf: PooledBuffer::new(capacity),
        }
    }

    pub fn with_pool(pool: Arc<dyn ArrayPool>, capacity: usize) -> Self {
        LinearStream {
            buf: PooledBuffer::with_pool(pool, capacity),
        }
    }

    /// Creates a stream holding a copy of `bytes`, positioned at 0.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut stream = Self::with_capacity(bytes.len());
        // A fresh stream has room for `bytes`, so the write cannot fail.
        if let Ok(array) = stream.buf.array_mut() {
            array[..bytes.len()].copy_from_slice(bytes);
            stream.buf.len = bytes.len();
        }
        stream
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.buf.position
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), StreamError> {
        self.seek_to(SeekFrom::Start(position as u64)).map(|_| ())
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.buf.is_disposed()
    }

    /// Returns the array to the pool; every later call fails with `Disposed`.
    pub fn dispose(&mut self) {
        self.buf.dispose();
    }

    /// Copies bytes at the cursor into `out`, returning how many were copied.
    pub fn read_into(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        let array = self.buf.array()?;
        let start = self.buf.position;
        let n = out.len().min(self.buf.len - start);
        out[..n].copy_from_slice(&array[start..start + n]);
        self.buf.position += n;
        Ok(n)
    }

    /// Writes all of `data` at the cursor, growing as needed.
    pub fn write_from(&mut self, data: &[u8]) -> Result<(), StreamError> {
        self.buf.check()?;
        let start = self.buf.position;
        let end = start
            .checked_add(data.len())
            .filter(|&end| end <= MAX_LEN)
            .ok_or(StreamError::out_of_range("length", start as i128 + data.len() as i128, MAX_LEN))?;

        self.buf.reserve(end, Anchor::Front)?;
        self.buf.array_mut()?[start..end].copy_from_slice(data);
        self.buf.position = end;
        self.buf.len = self.buf.len.max(end);
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, StreamError> {
        let array = self.buf.array()?;
        if self.buf.position >= self.buf.len {
            return Err(StreamError::EndOfStream);
        }
        let byte = array[self.buf.position];
        self.buf.position += 1;
        Ok(byte)
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), StreamError> {
        self.write_from(&[byte])
    }

    /// Moves the cursor; targets outside `[0, len]` fail with `OutOfRange`.
    pub fn seek_to(&mut self, from: SeekFrom) -> Result<u64, StreamError> {
        self.buf.check()?;
        let target = seek_target(from, self.buf.position, self.buf.len)?;
        self.buf.position = target;
        Ok(target as u64)
    }

    /// Truncates or zero-extends the stream to `len` bytes.
    pub fn set_len(&mut self, len: u64) -> Result<(), StreamError> {
        self.buf.check()?;
        if len > MAX_LEN as u64 {
            return Err(StreamError::out_of_range("length", len, MAX_LEN));
        }
        let len = len as usize;
        self.buf.reserve(len, Anchor::Front)?;

        let old = self.buf.len;
        if len > old {
            // rented arrays may carry stale bytes
            self.buf.array_mut()?[old..len].fill(0);
        }
        self.buf.len = len;
        self.buf.position = self.buf.position.min(len);
        Ok(())
    }

    /// The live bytes `[0, len)`, aliasing the rented array.
    pub fn as_bytes(&self) -> Result<&[u8], StreamError> {
        Ok(&self.buf.array()?[..self.buf.len])
    }

    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8], StreamError> {
        let len = self.buf.len;
        Ok(&mut self.buf.array_mut()?[..len])
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, StreamError> {
        self.as_bytes().map(<[u8]>::to_vec)
    }
}

impl Default for LinearStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for LinearStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl Write for LinearStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_from(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.buf.check()?)
    }
}

impl Seek for LinearStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(self.seek_to(pos)?)
    }
}
