//! Length-prefixed frames assembled back to front.
//!
//! A frame is a length header followed by its payload. The payload is built
//! first on a [`ReverseStream`], so the header can be prepended once its
//! size is known without shifting any payload byte.

use std::io::Read;
use std::sync::Arc;

use pooled_bytes::{ArrayPool, ReverseStream};
use tracing::debug;
use typed_view::{ByteOrder, SwapLayout, ValueReader, ViewError, to_order};

use crate::error::{Error, Result};

/// Width of a frame's length header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPrefix {
    U16,
    #[default]
    U32,
}

impl LengthPrefix {
    /// Largest payload the header can describe.
    pub fn max_len(self) -> usize {
        match self {
            LengthPrefix::U16 => u16::MAX as usize,
            LengthPrefix::U32 => u32::MAX as usize,
        }
    }

    pub fn header_len(self) -> usize {
        match self {
            LengthPrefix::U16 => 2,
            LengthPrefix::U32 => 4,
        }
    }
}

/// Builds one frame.
///
/// Every push lands in front of the previous one, so fields are pushed
/// last to first:
///
/// ```
/// use binary_io::{ByteOrder, FrameBuilder, LengthPrefix};
///
/// let mut frame = FrameBuilder::new(LengthPrefix::U16, ByteOrder::Big);
/// frame.push_bytes(b"world").unwrap();
/// frame.push_value(&0x0102u16).unwrap();
/// let bytes = frame.finish().unwrap();
/// assert_eq!(bytes, b"\x00\x07\x01\x02world");
/// ```
#[derive(Debug)]
pub struct FrameBuilder {
    payload: ReverseStream,
    prefix: LengthPrefix,
    order: ByteOrder,
}

impl FrameBuilder {
    pub fn new(prefix: LengthPrefix, order: ByteOrder) -> Self {
        Self {
            payload: ReverseStream::new(),
            prefix,
            order,
        }
    }

    pub fn with_pool(
        pool: Arc<dyn ArrayPool>,
        capacity: usize,
        prefix: LengthPrefix,
        order: ByteOrder,
    ) -> Self {
        Self {
            payload: ReverseStream::with_pool(pool, capacity),
            prefix,
            order,
        }
    }

    /// Payload bytes pushed so far.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Places `bytes` in front of everything pushed so far.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.payload.write_from(bytes)?;
        Ok(())
    }

    /// Places `value` in the frame's byte order in front of everything
    /// pushed so far.
    pub fn push_value<T: SwapLayout>(&mut self, value: &T) -> Result<()> {
        let value = to_order(*value, self.order);
        self.push_bytes(bytemuck::bytes_of(&value))
    }

    /// Prepends the length header and returns the finished frame. The
    /// payload buffer goes back to its pool.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let len = self.payload.len();
        if len > self.prefix.max_len() {
            return Err(Error::FrameTooLarge {
                len,
                max: self.prefix.max_len(),
            });
        }

        match self.prefix {
            LengthPrefix::U16 => self.push_value(&(len as u16))?,
            LengthPrefix::U32 => self.push_value(&(len as u32))?,
        }
        debug!(payload = len, prefix = ?self.prefix, "frame finished");
        Ok(self.payload.to_vec()?)
    }
}

/// Reads one frame written by [`FrameBuilder`] and returns its payload.
///
/// The buffer grows with the bytes actually read, not with the header's
/// claim; a payload shorter than its header fails with `EndOfStream`.
pub fn read_frame<R: Read>(reader: R, prefix: LengthPrefix, order: ByteOrder) -> Result<Vec<u8>> {
    let mut values = ValueReader::new(reader, order);
    let len = match prefix {
        LengthPrefix::U16 => u64::from(values.read::<u16>()?),
        LengthPrefix::U32 => u64::from(values.read::<u32>()?),
    };

    let mut payload = Vec::new();
    values
        .into_inner()
        .take(len)
        .read_to_end(&mut payload)
        .map_err(ViewError::from)?;
    if (payload.len() as u64) < len {
        return Err(ViewError::EndOfStream.into());
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pooled_bytes::SharedPool;

    #[test]
    fn header_is_prepended() {
        let mut frame = FrameBuilder::new(LengthPrefix::U32, ByteOrder::Little);
        frame.push_bytes(&[9, 9]).unwrap();
        frame.push_value(&0xAABBu16).unwrap();
        assert_eq!(frame.payload_len(), 4);
        assert_eq!(
            frame.finish().unwrap(),
            [4, 0, 0, 0, 0xBB, 0xAA, 9, 9]
        );
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let mut frame = FrameBuilder::new(LengthPrefix::U16, ByteOrder::Big);
        frame.push_bytes(&vec![0u8; 70_000]).unwrap();
        assert!(matches!(
            frame.finish(),
            Err(Error::FrameTooLarge { len: 70_000, max: 65_535 })
        ));
    }

    #[test]
    fn finishing_returns_the_array() {
        let pool = Arc::new(SharedPool::new());
        let mut frame =
            FrameBuilder::with_pool(pool.clone(), 8, LengthPrefix::U16, ByteOrder::Big);
        frame.push_bytes(&[1; 20]).unwrap();
        frame.finish().unwrap();

        let stats = pool.stats();
        assert_eq!(stats.rented, stats.released);
    }

    #[test]
    fn read_back() {
        let mut frame = FrameBuilder::new(LengthPrefix::U16, ByteOrder::Big);
        frame.push_bytes(b"abc").unwrap();
        let bytes = frame.finish().unwrap();

        let payload = read_frame(bytes.as_slice(), LengthPrefix::U16, ByteOrder::Big).unwrap();
        assert_eq!(payload, b"abc");

        assert!(matches!(
            read_frame(&bytes[..3], LengthPrefix::U16, ByteOrder::Big),
            Err(Error::View(ViewError::EndOfStream))
        ));
    }

    #[test]
    fn short_payload_fails_without_trusting_header() {
        // header claims u32::MAX bytes, two follow
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 1, 2];
        assert!(matches!(
            read_frame(&bytes[..], LengthPrefix::U32, ByteOrder::Little),
            Err(Error::View(ViewError::EndOfStream))
        ));

        let mut stream = &[0, 2, 7, 8, 9][..];
        assert_eq!(read_frame(&mut stream, LengthPrefix::U16, ByteOrder::Big).unwrap(), [7, 8]);
        assert_eq!(stream, [9]);
    }
}
