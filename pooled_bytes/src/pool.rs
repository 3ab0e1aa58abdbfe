//! Array pools backing the pooled streams.
//!
//! Streams never allocate their storage directly: they rent a byte array
//! from an [`ArrayPool`] on construction and on growth, and hand it back
//! exactly once when disposed.
//!
//! ```
//! use pooled_bytes::pool::{ArrayPool, SharedPool};
//!
//! let pool = SharedPool::new();
//! let array = pool.rent(100);
//! assert!(array.len() >= 100);
//! pool.release(array);
//!
//! assert_eq!(pool.stats().rented, 1);
//! assert_eq!(pool.stats().released, 1);
//! ```

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

/// Smallest array handed out by [`SharedPool`].
pub const MIN_ARRAY_LEN: usize = 16;

/// Source of byte arrays for pooled streams.
///
/// Implementations must be thread-safe. Arrays returned by `rent` may
/// contain stale bytes from a previous renter.
pub trait ArrayPool: Send + Sync {
    /// Rents an array of at least `min_len` bytes.
    fn rent(&self, min_len: usize) -> Box<[u8]>;

    /// Returns an array previously obtained from `rent`.
    fn release(&self, array: Box<[u8]>);
}

/// Retention limits for a [`SharedPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Arrays kept per size class; extra releases are dropped.
    pub max_arrays_per_bucket: usize,
    /// Arrays longer than this are never retained.
    pub max_array_len: usize,
    /// Capacity rented by the `new()` constructors of the streams.
    pub initial_stream_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_arrays_per_bucket: 32,
            max_array_len: 1 << 20,
            initial_stream_capacity: 256,
        }
    }
}

/// Counters describing pool traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub rented: u64,
    pub released: u64,
    /// Arrays currently held in the free lists.
    pub retained: usize,
}

/// Power-of-two bucketed pool guarded by a single mutex.
#[derive(Debug)]
pub struct SharedPool {
    config: PoolConfig,
    buckets: Mutex<Vec<Vec<Box<[u8]>>>>,
    rented: AtomicU64,
    released: AtomicU64,
}

impl SharedPool {
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    pub fn with_config(config: PoolConfig) -> Self {
        SharedPool {
            config,
            buckets: Mutex::new(Vec::new()),
            rented: AtomicU64::new(0),
            released: AtomicU64::new(0),
        }
    }

    /// Process-wide pool used by streams created without an explicit pool.
    pub fn global() -> &'static SharedPool {
        static GLOBAL: OnceLock<SharedPool> = OnceLock::new();
        GLOBAL.get_or_init(SharedPool::new)
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn stats(&self) -> PoolStats {
        let retained = self.buckets.lock().iter().map(Vec::len).sum();
        PoolStats {
            rented: self.rented.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            retained,
        }
    }

    /// Drops every retained array.
    pub fn clear(&self) {
        self.buckets.lock().clear();
    }

    #[inline]
    fn size_class(min_len: usize) -> (usize, usize) {
        let len = min_len.max(MIN_ARRAY_LEN).next_power_of_two();
        let bucket = (len.trailing_zeros() - MIN_ARRAY_LEN.trailing_zeros()) as usize;
        (bucket, len)
    }
}

impl Default for SharedPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayPool for SharedPool {
    fn rent(&self, min_len: usize) -> Box<[u8]> {
        self.rented.fetch_add(1, Ordering::Relaxed);
        let (bucket, len) = Self::size_class(min_len);

        if let Some(array) = self
            .buckets
            .lock()
            .get_mut(bucket)
            .and_then(|free| free.pop())
        {
            return array;
        }

        trace!(len, "pool miss, allocating array");
        vec![0u8; len].into_boxed_slice()
    }

    fn release(&self, array: Box<[u8]>) {
        self.released.fetch_add(1, Ordering::Relaxed);
        let len = array.len();
        // Only exact size classes go back on a free list.
        if len > self.config.max_array_len || len < MIN_ARRAY_LEN || !len.is_power_of_two() {
            return;
        }
        let (bucket, _) = Self::size_class(len);

        let mut buckets = self.buckets.lock();
        if buckets.len() <= bucket {
            buckets.resize_with(bucket + 1, Vec::new);
        }
        let free = &mut buckets[bucket];
        if free.len() < self.config.max_arrays_per_bucket {
            free.push(array);
        }
    }
}

impl<P: ArrayPool + ?Sized> ArrayPool for &'static P {
    fn rent(&self, min_len: usize) -> Box<[u8]> {
        (**self).rent(min_len)
    }

    fn release(&self, array: Box<[u8]>) {
        (**self).release(array)
    }
}
