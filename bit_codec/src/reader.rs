use std::io::{Read, Seek, SeekFrom};

use tracing::trace;

use crate::BitError;
use crate::cursor::BitCursor;
use crate::order::ByteOrderSpec;

/// Reads values of 1 to 64 bits from a byte stream.
///
/// The reader owns `R`; pass `&mut stream` to keep the stream afterwards.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    cursor: BitCursor,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R, spec: ByteOrderSpec) -> Self {
        Self {
            inner,
            cursor: BitCursor::new(spec),
        }
    }

    #[inline]
    pub fn spec(&self) -> ByteOrderSpec {
        self.cursor.spec()
    }

    /// Bits of the current stream byte already consumed.
    #[inline]
    pub fn bit_offset(&self) -> u8 {
        self.cursor.bit_offset()
    }

    /// Reads `len` bits, `len` in `1..=64`, right-aligned.
    ///
    /// A read cut short by `EndOfStream` leaves the reader byte-aligned after
    /// the last byte it consumed; the partial value is dropped.
    pub fn read_bits(&mut self, len: u32) -> Result<u64, BitError> {
        BitError::check_len(len, 64)?;
        self.take(len)
    }

    pub fn read_bool(&mut self) -> Result<bool, BitError> {
        Ok(self.take(1)? == 1)
    }

    pub fn read_u8(&mut self, bits: u32) -> Result<u8, BitError> {
        BitError::check_len(bits, 8)?;
        Ok(self.take(bits)? as u8)
    }

    pub fn read_u16(&mut self, bits: u32) -> Result<u16, BitError> {
        BitError::check_len(bits, 16)?;
        Ok(self.take(bits)? as u16)
    }

    pub fn read_u32(&mut self, bits: u32) -> Result<u32, BitError> {
        BitError::check_len(bits, 32)?;
        Ok(self.take(bits)? as u32)
    }

    pub fn read_u64(&mut self, bits: u32) -> Result<u64, BitError> {
        self.read_bits(bits)
    }

    /// Reads `len` bits and sign-extends bit `len - 1`.
    pub fn read_signed(&mut self, len: u32) -> Result<i64, BitError> {
        let raw = self.read_bits(len)?;
        let shift = 64 - len;
        Ok(((raw << shift) as i64) >> shift)
    }

    /// Fills `buf` with whole bytes, at any bit offset.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), BitError> {
        if self.cursor.is_idle() {
            self.inner.read_exact(buf)?;
            return Ok(());
        }
        for b in buf.iter_mut() {
            *b = self.take(8)? as u8;
        }
        Ok(())
    }

    pub fn skip_bits(&mut self, mut count: u64) -> Result<(), BitError> {
        while count > 0 {
            let step = count.min(64) as u32;
            self.take(step)?;
            count -= u64::from(step);
        }
        Ok(())
    }

    /// Discards the rest of the current byte.
    pub fn align(&mut self) {
        self.cursor.reset();
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn take(&mut self, len: u32) -> Result<u64, BitError> {
        let inner = &mut self.inner;
        let value = self.cursor.take_bits(len, || {
            let mut byte = [0u8];
            inner.read_exact(&mut byte).map(|()| byte[0])
        })?;
        Ok(value)
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Stream byte the next bit comes from.
    pub fn byte_position(&mut self) -> Result<u64, BitError> {
        let position = self.inner.stream_position()?;
        // a partly consumed byte has already been fetched
        Ok(if self.cursor.is_idle() {
            position
        } else {
            position - 1
        })
    }

    pub fn bit_position(&mut self) -> Result<u64, BitError> {
        Ok(self.byte_position()? * 8 + u64::from(self.cursor.bit_offset()))
    }

    /// Moves to byte `position`, discarding pending bits.
    pub fn set_byte_position(&mut self, position: u64) -> Result<(), BitError> {
        if !self.cursor.is_idle() {
            trace!(bit_offset = self.cursor.bit_offset(), "discarding pending bits before seek");
        }
        self.cursor.reset();
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    pub fn set_bit_position(&mut self, position: u64) -> Result<(), BitError> {
        self.set_byte_position(position / 8)?;
        let offset = (position % 8) as u8;
        if offset != 0 {
            let mut byte = [0u8];
            self.inner.read_exact(&mut byte)?;
            self.cursor.resume(byte[0], offset);
        }
        Ok(())
    }
}
