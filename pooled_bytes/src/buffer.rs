use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::StreamError;
use crate::pool::{ArrayPool, SharedPool};

/// Largest logical length any pooled stream may reach.
pub const MAX_LEN: usize = isize::MAX as usize;

/// Which end of the rented array holds the live bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    /// Live bytes occupy `[0, len)`.
    Front,
    /// Live bytes occupy `[capacity - len, capacity)`.
    Back,
}

/// One rented array plus the logical length and cursor shared by every
/// stream variant.
///
/// The array is returned to its pool exactly once, either by
/// [`dispose`](PooledBuffer::dispose) or on drop.
pub struct PooledBuffer {
    array: Option<Box<[u8]>>,
    pool: Arc<dyn ArrayPool>,
    pub(crate) len: usize,
    pub(crate) position: usize,
}

impl PooledBuffer {
    /// Rents an array of at least `capacity` bytes from the global pool.
    pub fn new(capacity: usize) -> Self {
        Self::with_pool(Arc::new(SharedPool::global()), capacity)
    }

    /// Rents an array of at least `capacity` bytes from `pool`.
    pub fn with_pool(pool: Arc<dyn ArrayPool>, capacity: usize) -> Self {
        let array = pool.rent(capacity);
        PooledBuffer {
            array: Some(array),
            pool,
            len: 0,
            position: 0,
        }
    }

    /// Physical size of the rented array, 0 once disposed.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.array.as_ref().map_or(0, |a| a.len())
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.array.is_none()
    }

    #[inline]
    pub(crate) fn check(&self) -> Result<(), StreamError> {
        if self.array.is_some() {
            Ok(())
        } else {
            Err(StreamError::Disposed)
        }
    }

    #[inline]
    pub(crate) fn array(&self) -> Result<&[u8], StreamError> {
        self.array.as_deref().ok_or(StreamError::Disposed)
    }

    #[inline]
    pub(crate) fn array_mut(&mut self) -> Result<&mut [u8], StreamError> {
        self.array.as_deref_mut().ok_or(StreamError::Disposed)
    }

    /// Makes room for at least `required` bytes, keeping the live bytes
    /// anchored at the same end of the array.
    pub(crate) fn reserve(&mut self, required: usize, anchor: Anchor) -> Result<(), StreamError> {
        let capacity = self.capacity();
        self.check()?;
        if required <= capacity {
            return Ok(());
        }
        if required > MAX_LEN {
            return Err(StreamError::out_of_range("length", required as i128, MAX_LEN));
        }

        let target = required.max(capacity.saturating_mul(2)).min(MAX_LEN);
        let mut fresh = self.pool.rent(target);
        let old = self.array.take().ok_or(StreamError::Disposed)?;
        let len = self.len;

        match anchor {
            Anchor::Front => fresh[..len].copy_from_slice(&old[..len]),
            Anchor::Back => {
                let (new_cap, old_cap) = (fresh.len(), old.len());
                fresh[new_cap - len..].copy_from_slice(&old[old_cap - len..]);
            }
        }
        debug!(from = capacity, to = fresh.len(), len, ?anchor, "growing pooled buffer");

        self.pool.release(old);
        self.array = Some(fresh);
        Ok(())
    }

    /// Returns the array to the pool. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if let Some(array) = self.array.take() {
            debug!(capacity = array.len(), len = self.len, "disposing pooled buffer");
            self.pool.release(array);
        }
        self.len = 0;
        self.position = 0;
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("position", &self.position)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Resolves a seek request against `len`.
pub(crate) fn seek_target(
    from: std::io::SeekFrom,
    position: usize,
    len: usize,
) -> Result<usize, StreamError> {
    use std::io::SeekFrom;

    let target: i128 = match from {
        SeekFrom::Start(off) => off as i128,
        SeekFrom::Current(off) => position as i128 + off as i128,
        SeekFrom::End(off) => len as i128 + off as i128,
    };
    if target < 0 || target > len as i128 {
        return Err(StreamError::out_of_range("position", target, len));
    }
    Ok(target as usize)
}
