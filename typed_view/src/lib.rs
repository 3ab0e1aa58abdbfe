//! Typed views over byte regions and layout-driven endianness conversion.
//!
//! This crate provides:
//! - `cast` / `cast_mut`: zero-copy reinterpretation between `Pod` slices
//! - `SwapLayout`: per-type layout tables, with `#[derive(SwapLayout)]` for records
//! - `LayoutCache` and the bulk `swap_region` hot path
//! - `ValueReader` / `ValueWriter` for streams of values in a chosen `ByteOrder`
//!
//! ## Features
//! - `derive` (default): re-export `#[derive(SwapLayout)]`
//!
//! ```
//! use typed_view::{ByteOrder, ValueReader, ValueWriter};
//!
//! let mut w = ValueWriter::new(Vec::new(), ByteOrder::Big);
//! w.write(&0xCAFEu16).unwrap();
//! let bytes = w.into_inner();
//! assert_eq!(bytes, [0xCA, 0xFE]);
//!
//! let mut r = ValueReader::new(bytes.as_slice(), ByteOrder::Big);
//! assert_eq!(r.read::<u16>().unwrap(), 0xCAFE);
//! ```

// derived impls name `::typed_view`, which must also resolve in this crate's tests
extern crate self as typed_view;

pub use bytemuck;

mod cache;
mod cast;
mod error;
mod io;
mod layout;
mod order;
mod swap;
mod u24;

pub use cache::LayoutCache;
pub use cast::{cast, cast_mut, from_bytes, read_at, write_at};
pub use error::ViewError;
pub use io::{ValueReader, ValueWriter};
pub use layout::{LayoutBuilder, SwapLayout, TypeLayout, compute_layout};
pub use order::ByteOrder;
pub use swap::{swap, swap_region, swap_slice, swap_slice_with, swap_with, to_order};
pub use u24::{I24, U24};

#[cfg(feature = "derive")]
pub use typed_view_derive::SwapLayout;
