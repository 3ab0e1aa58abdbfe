//! # pooled_bytes
//!
//! Resizable byte streams backed by arrays rented from a shared pool.
//!
//! Three variants share one [`PooledBuffer`] core:
//!
//! - [`LinearStream`]: the usual forward-growing memory stream
//! - [`ReverseStream`]: grows toward index 0 so data can be prepended
//! - [`RingStream`]: fixed capacity, wraps and keeps the newest bytes
//!
//! ```rust
//! use std::io::Write;
//! use pooled_bytes::{LinearStream, ReverseStream};
//!
//! let mut body = LinearStream::new();
//! body.write_all(&[1, 2, 3]).unwrap();
//!
//! let mut frame = ReverseStream::new();
//! frame.write_all(body.as_bytes().unwrap()).unwrap();
//! frame.write_all(&[3]).unwrap(); // length prefix written last
//! assert_eq!(frame.as_bytes().unwrap(), &[3, 1, 2, 3]);
//! ```

pub mod buffer;
pub mod error;
pub mod linear;
pub mod pool;
pub mod reverse;
pub mod ring;

pub use buffer::{MAX_LEN, PooledBuffer};
pub use error::StreamError;
pub use linear::LinearStream;
pub use pool::{ArrayPool, PoolConfig, PoolStats, SharedPool};
pub use reverse::ReverseStream;
pub use ring::RingStream;
