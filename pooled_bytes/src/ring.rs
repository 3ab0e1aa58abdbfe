//! Fixed-capacity wrapping stream.
//!
//! A `RingStream` never grows. Its content is the last `capacity` bytes of
//! everything written, ordered oldest-first starting at the wrap point
//! (`origin`). The position is a logical offset from the oldest byte; the
//! physical slot it addresses is `(origin + position) % capacity`.
//!
//! Writing past `capacity` keeps only the tail: the oldest bytes are
//! overwritten and the cursor ends up at the end of the retained window.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use crate::buffer::PooledBuffer;
use crate::pool::ArrayPool;
use crate::StreamError;

/// A pool-backed ring of exactly `capacity` bytes.
///
/// ```
/// use pooled_bytes::RingStream;
///
/// let mut ring = RingStream::new(4).unwrap();
/// ring.write_from(b"abcdef").unwrap();
/// assert_eq!(ring.to_vec().unwrap(), b"cdef");
/// ```
#[derive(Debug)]
pub struct RingStream {
    buf: PooledBuffer,
    capacity: usize,
    origin: usize,
}

impl RingStream {
    /// Creates a ring on the global pool. A zero capacity is rejected.
    pub fn new(capacity: usize) -> Result<Self, StreamError> {
        Self::from_buffer(PooledBuffer::new(capacity), capacity)
    }

    pub fn with_pool(pool: Arc<dyn ArrayPool>, capacity: usize) -> Result<Self, StreamError> {
        Self::from_buffer(PooledBuffer::with_pool(pool, capacity), capacity)
    }

    fn from_buffer(mut buf: PooledBuffer, capacity: usize) -> Result<Self, StreamError> {
        if capacity == 0 {
            return Err(StreamError::InvalidArgument(
                "ring capacity must be non-zero".into(),
            ));
        }
        // Holes left by seeking past written data read as zeros.
        buf.array_mut()?[..capacity].fill(0);
        Ok(RingStream {
            buf,
            capacity,
            origin: 0,
        })
    }

    /// Logical capacity fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
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
    pub fn is_full(&self) -> bool {
        self.buf.len == self.capacity
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

    pub fn dispose(&mut self) {
        self.buf.dispose();
        self.origin = 0;
    }

    #[inline]
    fn slot(&self, logical: usize) -> usize {
        (self.origin + logical % self.capacity) % self.capacity
    }

    pub fn read_into(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        let start = self.slot(self.buf.position);
        let n = out.len().min(self.buf.len - self.buf.position);
        let array = &self.buf.array()?[..self.capacity];

        let first = n.min(self.capacity - start);
        out[..first].copy_from_slice(&array[start..start + first]);
        out[first..n].copy_from_slice(&array[..n - first]);

        self.buf.position += n;
        Ok(n)
    }

    /// Writes `data` at the cursor, wrapping and evicting the oldest bytes
    /// once the ring is full.
    pub fn write_from(&mut self, data: &[u8]) -> Result<(), StreamError> {
        self.buf.check()?;
        let cap = self.capacity;
        let at = self.buf.position;
        let n = data.len();

        if at + n <= cap {
            let start = self.slot(at);
            copy_wrapped(&mut self.buf.array_mut()?[..cap], start, data);
            self.buf.position = at + n;
            self.buf.len = self.buf.len.max(at + n);
            return Ok(());
        }

        // Only the last `cap` bytes of the logical content survive.
        let keep = n.min(cap);
        let evicted = at + n - cap;
        let start = self.slot((at + n - keep) % cap);
        copy_wrapped(&mut self.buf.array_mut()?[..cap], start, &data[n - keep..]);

        self.origin = (self.origin + evicted % cap) % cap;
        self.buf.len = cap;
        self.buf.position = cap;
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, StreamError> {
        let array = self.buf.array()?;
        if self.buf.position >= self.buf.len {
            return Err(StreamError::EndOfStream);
        }
        let byte = array[self.slot(self.buf.position)];
        self.buf.position += 1;
        Ok(byte)
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), StreamError> {
        self.write_from(&[byte])
    }

    /// Moves the cursor. Targets beyond `len` are first reduced modulo the
    /// capacity; what remains must still fall inside `[0, len]`.
    pub fn seek_to(&mut self, from: SeekFrom) -> Result<u64, StreamError> {
        self.buf.check()?;
        let len = self.buf.len;
        let target: i128 = match from {
            SeekFrom::Start(off) => off as i128,
            SeekFrom::Current(off) => self.buf.position as i128 + off as i128,
            SeekFrom::End(off) => len as i128 + off as i128,
        };
        if target < 0 {
            return Err(StreamError::out_of_range("position", target, len));
        }
        let mut target = target as u128;
        if target > len as u128 {
            target %= self.capacity as u128;
        }
        if target > len as u128 {
            return Err(StreamError::out_of_range("position", target as i128, len));
        }
        self.buf.position = target as usize;
        Ok(target as u64)
    }

    /// Rings have a fixed size.
    pub fn set_len(&mut self, _len: u64) -> Result<(), StreamError> {
        self.buf.check()?;
        Err(StreamError::Unsupported("set_len on a ring stream"))
    }

    /// Retained bytes oldest-first, split at the physical end of the array.
    pub fn as_slices(&self) -> Result<(&[u8], &[u8]), StreamError> {
        let array = &self.buf.array()?[..self.capacity];
        let len = self.buf.len;
        let head = len.min(self.capacity - self.origin);
        Ok((
            &array[self.origin..self.origin + head],
            &array[..len - head],
        ))
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, StreamError> {
        let (a, b) = self.as_slices()?;
        let mut out = Vec::with_capacity(a.len() + b.len());
        out.extend_from_slice(a);
        out.extend_from_slice(b);
        Ok(out)
    }
}

fn copy_wrapped(ring: &mut [u8], start: usize, data: &[u8]) {
    let first = data.len().min(ring.len() - start);
    ring[start..start + first].copy_from_slice(&data[..first]);
    ring[..data.len() - first].copy_from_slice(&data[first..]);
}

impl Read for RingStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf)?)
    }
}

impl Write for RingStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_from(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.buf.check()?)
    }
}

impl Seek for RingStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(self.seek_to(pos)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::SharedPool;

    fn ring(capacity: usize) -> RingStream {
        RingStream::with_pool(Arc::new(SharedPool::new()), capacity).unwrap()
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(
            RingStream::with_pool(Arc::new(SharedPool::new()), 0),
            Err(StreamError::InvalidArgument(_))
        ));
    }

    #[test]
    fn fills_like_a_linear_stream() -> Result<(), StreamError> {
        let mut r = ring(8);
        r.write_from(b"abc")?;
        assert_eq!(r.len(), 3);
        assert!(!r.is_full());
        r.set_position(0)?;
        let mut out = [0u8; 8];
        assert_eq!(r.read_into(&mut out)?, 3);
        assert_eq!(&out[..3], b"abc");
        Ok(())
    }

    #[test]
    fn overflow_keeps_last_capacity_bytes() -> Result<(), StreamError> {
        let mut r = ring(8);
        let data: Vec<u8> = (0..11).collect();
        r.write_from(&data)?;
        assert!(r.is_full());
        assert_eq!(r.position(), 8);
        assert_eq!(r.to_vec()?, &data[3..]);

        r.set_position(0)?;
        let mut out = Vec::new();
        r.read_to_end(&mut out).map_err(|_| StreamError::EndOfStream)?;
        assert_eq!(out, &data[3..]);
        Ok(())
    }

    #[test]
    fn continuous_writes_evict_oldest() -> Result<(), StreamError> {
        let mut r = ring(4);
        for b in 0..10u8 {
            r.write_byte(b)?;
        }
        assert_eq!(r.to_vec()?, &[6, 7, 8, 9]);
        let (a, b) = r.as_slices()?;
        assert_eq!(a.len() + b.len(), 4);
        Ok(())
    }

    #[test]
    fn partial_overflow_from_the_middle() -> Result<(), StreamError> {
        let mut r = ring(8);
        r.write_from(b"abcde")?;
        r.write_from(b"123456")?;
        assert_eq!(r.to_vec()?, b"de123456");
        Ok(())
    }

    #[test]
    fn seek_is_taken_modulo_capacity() -> Result<(), StreamError> {
        let mut r = ring(4);
        r.write_from(b"wxyz")?;
        assert_eq!(r.seek_to(SeekFrom::Start(6))?, 2);
        assert_eq!(r.read_byte()?, b'y');
        assert_eq!(r.seek_to(SeekFrom::End(0))?, 4);

        let mut short = ring(8);
        short.write_from(b"ab")?;
        assert!(matches!(
            short.seek_to(SeekFrom::Start(5)),
            Err(StreamError::OutOfRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn set_len_unsupported() {
        let mut r = ring(4);
        assert!(matches!(r.set_len(2), Err(StreamError::Unsupported(_))));
        r.dispose();
        assert_eq!(r.set_len(2), Err(StreamError::Disposed));
        assert_eq!(r.write_byte(0), Err(StreamError::Disposed));
    }
}
