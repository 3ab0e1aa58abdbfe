//! Backward-growing pooled stream for back-to-front assembly.
//!
//! The live bytes always sit flush against the end of the rented array and
//! the position counts bytes from that end. Each write lands immediately in
//! front of the previous one, so a payload can be written first and its
//! header prepended once the payload size is known, without moving any
//! byte already written relative to its neighbours.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use crate::buffer::{Anchor, MAX_LEN, PooledBuffer, seek_target};
use crate::pool::{ArrayPool, SharedPool};
use crate::StreamError;

/// A pool-backed stream that grows toward index 0.
///
/// ```
/// use pooled_bytes::ReverseStream;
///
/// let mut stream = ReverseStream::new();
/// stream.write_from(b"payload").unwrap();
/// stream.write_from(&[7u8]).unwrap(); // header, prepended
/// assert_eq!(stream.as_bytes().unwrap(), b"\x07payload");
/// ```
#[derive(Debug)]
pub struct ReverseStream {
    buf: PooledBuffer,
}

impl ReverseStream {
    pub fn new() -> Self {
        Self::with_capacity(SharedPool::global().config().initial_stream_capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ReverseStream {
            buf: PooledBuffer::new(capacity),
        }
    }

    pub fn with_pool(pool: Arc<dyn ArrayPool>, capacity: usize) -> Self {
        ReverseStream {
            buf: PooledBuffer::with_pool(pool, capacity),
        }
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

    /// Distance of the cursor from the end of the array.
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

    pub fn dispose(&mut self) {
        self.buf.dispose();
    }

    /// Reads the `n` bytes just in front of the cursor, in memory order.
    pub fn read_into(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        let array = self.buf.array()?;
        let cap = array.len();
        let pos = self.buf.position;
        let n = out.len().min(self.buf.len - pos);
        out[..n].copy_from_slice(&array[cap - pos - n..cap - pos]);
        self.buf.position += n;
        Ok(n)
    }

    /// Places `data` in front of the cursor, growing toward index 0.
    pub fn write_from(&mut self, data: &[u8]) -> Result<(), StreamError> {
        self.buf.check()?;
        let pos = self.buf.position;
        let end = pos
            .checked_add(data.len())
            .filter(|&end| end <= MAX_LEN)
            .ok_or(StreamError::out_of_range("length", pos as i128 + data.len() as i128, MAX_LEN))?;

        self.buf.reserve(end, Anchor::Back)?;
        let array = self.buf.array_mut()?;
        let cap = array.len();
        array[cap - end..cap - pos].copy_from_slice(data);
        self.buf.position = end;
        self.buf.len = self.buf.len.max(end);
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, StreamError> {
        let array = self.buf.array()?;
        let pos = self.buf.position;
        if pos >= self.buf.len {
            return Err(StreamError::EndOfStream);
        }
        let byte = array[array.len() - pos - 1];
        self.buf.position += 1;
        Ok(byte)
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), StreamError> {
        self.write_from(&[byte])
    }

    pub fn seek_to(&mut self, from: SeekFrom) -> Result<u64, StreamError> {
        self.buf.check()?;
        let target = seek_target(from, self.buf.position, self.buf.len)?;
        self.buf.position = target;
        Ok(target as u64)
    }

    /// Extends toward index 0 with zeros, or drops bytes from the front.
    pub fn set_len(&mut self, len: u64) -> Result<(), StreamError> {
        self.buf.check()?;
        if len > MAX_LEN as u64 {
            return Err(StreamError::out_of_range("length", len, MAX_LEN));
        }
        let len = len as usize;
        self.buf.reserve(len, Anchor::Back)?;

        let old = self.buf.len;
        if len > old {
            let array = self.buf.array_mut()?;
            let cap = array.len();
            array[cap - len..cap - old].fill(0);
        }
        self.buf.len = len;
        self.buf.position = self.buf.position.min(len);
        Ok(())
    }

    /// The live bytes `[capacity - len, capacity)` in memory order.
    pub fn as_bytes(&self) -> Result<&[u8], StreamError> {
        let array = self.buf.array()?;
        Ok(&array[array.len() - self.buf.len..])
    }

    pub fn as_bytes_mut(&mut self) -> Result<&mut [u8], StreamError> {
        let len = self.buf.len;
        let array = self.buf.array_mut()?;
        let cap = array.len();
        Ok(&mut array[cap - len..])
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, StreamError> {
        self.as_bytes().map(<[u8]>::to_vec)
    }
}

impl Default for ReverseStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for ReverseStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl Write for ReverseStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_from(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.buf.check()?)
    }
}

impl Seek for ReverseStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(self.seek_to(pos)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(capacity: usize) -> ReverseStream {
        ReverseStream::with_pool(Arc::new(SharedPool::new()), capacity)
    }

    #[test]
    fn writes_prepend() -> Result<(), StreamError> {
        let mut s = stream(16);
        s.write_from(b"world")?;
        s.write_from(b"hello ")?;
        assert_eq!(s.as_bytes()?, b"hello world");
        assert_eq!(s.position(), 11);
        Ok(())
    }

    #[test]
    fn single_bytes_end_up_reversed() -> Result<(), StreamError> {
        let mut s = stream(16);
        for b in 1..=4u8 {
            s.write_byte(b)?;
        }
        assert_eq!(s.as_bytes()?, &[4, 3, 2, 1]);
        Ok(())
    }

    #[test]
    fn reads_mirror_writes() -> Result<(), StreamError> {
        let mut s = stream(16);
        s.write_from(b"abc")?;
        s.write_from(b"de")?;
        s.set_position(0)?;

        let mut first = [0u8; 3];
        assert_eq!(s.read_into(&mut first)?, 3);
        assert_eq!(&first, b"abc");
        assert_eq!(s.read_byte()?, b'e');
        assert_eq!(s.read_byte()?, b'd');
        assert_eq!(s.read_byte(), Err(StreamError::EndOfStream));
        Ok(())
    }

    #[test]
    fn growth_keeps_end_alignment() -> Result<(), StreamError> {
        let mut s = stream(16);
        let data: Vec<u8> = (0..100).collect();
        s.write_from(&data)?;
        s.write_from(b"hdr")?;
        assert!(s.capacity() >= 103);

        let bytes = s.as_bytes()?;
        assert_eq!(&bytes[..3], b"hdr");
        assert_eq!(&bytes[3..], &data[..]);
        Ok(())
    }

    #[test]
    fn overwrite_inside_keeps_len() -> Result<(), StreamError> {
        let mut s = stream(16);
        s.write_from(b"abcdef")?;
        s.set_position(2)?;
        s.write_from(b"XY")?;
        assert_eq!(s.as_bytes()?, b"abXYef");
        assert_eq!(s.len(), 6);
        Ok(())
    }

    #[test]
    fn set_len_front() -> Result<(), StreamError> {
        let mut s = stream(16);
        s.write_from(b"abc")?;
        s.set_len(5)?;
        assert_eq!(s.as_bytes()?, &[0, 0, b'a', b'b', b'c']);
        s.set_len(2)?;
        assert_eq!(s.as_bytes()?, b"bc");
        assert_eq!(s.position(), 2);
        Ok(())
    }

    #[test]
    fn disposed_guard() {
        let mut s = stream(16);
        s.dispose();
        assert_eq!(s.write_byte(1), Err(StreamError::Disposed));
        assert_eq!(s.read_byte(), Err(StreamError::Disposed));
        assert_eq!(s.seek_to(SeekFrom::End(0)), Err(StreamError::Disposed));
    }

    #[test]
    fn failed_write_leaves_len_untouched() -> Result<(), StreamError> {
        let mut s = stream(16);
        s.write_from(b"abc")?;

        // cursor at the length limit; only the bounds check runs
        s.buf.len = MAX_LEN - 1;
        s.buf.position = MAX_LEN - 1;
        assert!(matches!(s.write_from(b"xy"), Err(StreamError::OutOfRange { .. })));
        assert_eq!((s.len(), s.position()), (MAX_LEN - 1, MAX_LEN - 1));

        s.buf.len = 3;
        s.buf.position = 3;
        assert!(matches!(
            s.set_len(MAX_LEN as u64 + 1),
            Err(StreamError::OutOfRange { .. })
        ));
        assert_eq!(s.len(), 3);
        assert_eq!(s.as_bytes()?, b"abc");
        Ok(())
    }
}
