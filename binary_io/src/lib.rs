//! # Binary I/O
//!
//! One entry point for the binary I/O stack.
//!
//! ## Features
//!
//! - **Pooled streams**: linear, reverse (prepend) and ring streams over rented arrays
//! - **Typed views**: zero-copy casts and layout-driven endianness swaps
//! - **Bit codec**: 1 to 64 bit fields with independent byte and bit order
//! - **Frames**: length-prefixed payloads assembled back to front
//!
//! ## Quick Start
//!
//! ```rust
//! use binary_io::prelude::*;
//!
//! #[repr(C)]
//! #[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, SwapLayout)]
//! #[bytemuck(crate = "binary_io::bytemuck")]
//! #[swap_layout(crate = "binary_io::typed_view")]
//! struct Sample {
//!     time: u32,
//!     value: i16,
//!     channel: u8,
//!     flags: u8,
//! }
//!
//! let sample = Sample { time: 7, value: -3, channel: 1, flags: 0b10 };
//!
//! let mut out = ValueWriter::new(LinearStream::new(), ByteOrder::Big);
//! out.write(&sample)?;
//!
//! let mut stream = out.into_inner();
//! stream.set_position(0)?;
//! let mut input = ValueReader::new(stream, ByteOrder::Big);
//! assert_eq!(input.read::<Sample>()?, sample);
//! # Ok::<(), binary_io::Error>(())
//! ```
//!
//! The derives name their home crates. A crate that depends only on
//! `binary_io` points them at the re-exports with the two `crate = ...`
//! attributes shown above.

pub mod error;
pub mod frame;
pub mod prelude;

pub use crate::error::{Error, Result};
pub use crate::frame::{FrameBuilder, LengthPrefix, read_frame};

// Re-export pooled_bytes types
pub use pooled_bytes::{
    ArrayPool, LinearStream, PoolConfig, PoolStats, ReverseStream, RingStream, SharedPool,
    StreamError,
};

// Re-export typed_view types
pub use typed_view::{
    ByteOrder, I24, LayoutBuilder, LayoutCache, SwapLayout, TypeLayout, U24, ValueReader,
    ValueWriter, ViewError, cast, cast_mut, compute_layout, from_bytes, read_at, swap,
    swap_region, swap_slice, swap_with, to_order, write_at,
};

// Re-export bit_codec types
pub use bit_codec::{BitCursor, BitError, BitOrder, BitReader, BitWriter, ByteOrderSpec};

// Re-export for convenience
pub use bytemuck::{self, Pod, Zeroable};
pub use typed_view;
