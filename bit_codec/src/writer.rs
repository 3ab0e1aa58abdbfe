use std::io::{self, Seek, SeekFrom, Write};

use tracing::{trace, warn};

use crate::cursor::BitCursor;
use crate::order::ByteOrderSpec;
use crate::BitError;

/// Writes values of 1 to 64 bits to a byte stream.
///
/// Bits accumulate in a one-byte buffer until a stream byte is complete.
/// A trailing partial byte is written zero-padded by [`flush`](Self::flush),
/// [`finish`](Self::finish) or when the writer is dropped. Errors on drop
/// are only logged; call `finish` to see them.
///
/// The writer owns `W`. Pass `&mut stream` to keep using the stream after
/// the writer is gone.
///
/// ```
/// use bit_codec::{BitWriter, ByteOrderSpec};
///
/// let mut w = BitWriter::new(Vec::new(), ByteOrderSpec::default());
/// w.write_bool(true).unwrap();
/// w.write_bits(0b101, 3).unwrap();
/// assert_eq!(w.finish().unwrap(), [0b1011]);
/// ```
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    // `None` only once `finish` has taken the stream
    inner: Option<W>,
    cursor: BitCursor,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W, spec: ByteOrderSpec) -> Self {
        Self {
            inner: Some(inner),
            cursor: BitCursor::new(spec),
        }
    }

    #[inline]
    pub fn spec(&self) -> ByteOrderSpec {
        self.cursor.spec()
    }

    /// Bits waiting in the pending byte.
    #[inline]
    pub fn bit_offset(&self) -> u8 {
        self.cursor.bit_offset()
    }

    /// Writes the low `len` bits of `value`, `len` in `1..=64`.
    pub fn write_bits(&mut self, value: u64, len: u32) -> Result<(), BitError> {
        BitError::check_len(len, 64)?;
        self.put(value, len)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), BitError> {
        self.put(u64::from(value), 1)
    }

    pub fn write_u8(&mut self, value: u8, bits: u32) -> Result<(), BitError> {
        BitError::check_len(bits, 8)?;
        self.put(u64::from(value), bits)
    }

    pub fn write_u16(&mut self, value: u16, bits: u32) -> Result<(), BitError> {
        BitError::check_len(bits, 16)?;
        self.put(u64::from(value), bits)
    }

    pub fn write_u32(&mut self, value: u32, bits: u32) -> Result<(), BitError> {
        BitError::check_len(bits, 32)?;
        self.put(u64::from(value), bits)
    }

    pub fn write_u64(&mut self, value: u64, bits: u32) -> Result<(), BitError> {
        self.write_bits(value, bits)
    }

    /// Writes the two's-complement low `len` bits of `value`.
    pub fn write_signed(&mut self, value: i64, len: u32) -> Result<(), BitError> {
        self.write_bits(value as u64, len)
    }

    /// Writes whole bytes, at any bit offset.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BitError> {
        if self.cursor.is_idle() {
            self.stream()?.write_all(bytes)?;
            return Ok(());
        }
        for &b in bytes {
            self.put(u64::from(b), 8)?;
        }
        Ok(())
    }

    /// Emits the pending byte, zero-padded, and flushes the stream.
    pub fn flush(&mut self) -> Result<(), BitError> {
        self.emit_pending()?;
        self.stream()?.flush()?;
        Ok(())
    }

    /// Flushes and hands back the stream.
    pub fn finish(mut self) -> Result<W, BitError> {
        self.flush()?;
        self.inner.take().ok_or_else(|| finished().into())
    }

    pub fn get_ref(&self) -> &W {
        match &self.inner {
            Some(inner) => inner,
            None => unreachable!("stream is only taken by finish"),
        }
    }

    /// Writing through this reference while bits are pending corrupts the
    /// output; flush first.
    pub fn get_mut(&mut self) -> &mut W {
        match &mut self.inner {
            Some(inner) => inner,
            None => unreachable!("stream is only taken by finish"),
        }
    }

    fn stream(&mut self) -> io::Result<&mut W> {
        self.inner.as_mut().ok_or_else(finished)
    }

    fn put(&mut self, value: u64, len: u32) -> Result<(), BitError> {
        let inner = self.inner.as_mut().ok_or_else(finished)?;
        self.cursor
            .put_bits(value, len, |b| inner.write_all(&[b]))?;
        Ok(())
    }

    fn emit_pending(&mut self) -> io::Result<()> {
        let inner = self.inner.as_mut().ok_or_else(finished)?;
        if let Some(byte) = self.cursor.flush() {
            inner.write_all(&[byte])?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        let Some(inner) = self.inner.as_mut() else {
            return;
        };
        if let Some(byte) = self.cursor.flush() {
            if let Err(err) = inner.write_all(&[byte]).and_then(|()| inner.flush()) {
                warn!(%err, "pending bits lost when dropping bit writer");
            }
        }
    }
}

fn finished() -> io::Error {
    io::Error::other("bit writer already finished")
}

impl<W: Write + Seek> BitWriter<W> {
    /// Stream byte the next bit lands in.
    pub fn byte_position(&mut self) -> Result<u64, BitError> {
        Ok(self.stream()?.stream_position()?)
    }

    pub fn bit_position(&mut self) -> Result<u64, BitError> {
        Ok(self.byte_position()? * 8 + u64::from(self.cursor.bit_offset()))
    }

    /// Writes out pending bits, then moves to byte `position`.
    pub fn set_byte_position(&mut self, position: u64) -> Result<(), BitError> {
        if !self.cursor.is_idle() {
            trace!(bit_offset = self.cursor.bit_offset(), "flushing pending bits before seek");
        }
        self.emit_pending()?;
        self.stream()?.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Moves to an absolute bit position. Bits before it in the same byte
    /// are written as zero when that byte is completed.
    pub fn set_bit_position(&mut self, position: u64) -> Result<(), BitError> {
        self.set_byte_position(position / 8)?;
        self.cursor.resume(0, (position % 8) as u8);
        Ok(())
    }
}
