//! # bit_codec
//!
//! Bit-granular reading and writing over any `std::io` byte stream, with
//! independent byte order and bit order.
//!
//! ```rust
//! use bit_codec::{BitOrder, BitReader, BitWriter, ByteOrder, ByteOrderSpec};
//!
//! let spec = ByteOrderSpec::new(ByteOrder::Big, BitOrder::Big);
//!
//! let mut w = BitWriter::new(Vec::new(), spec);
//! w.write_bits(0b101, 3).unwrap();
//! w.write_u16(0x3C0, 11).unwrap();
//! w.write_bool(true).unwrap();
//! let bytes = w.finish().unwrap();
//!
//! let mut r = BitReader::new(bytes.as_slice(), spec);
//! assert_eq!(r.read_bits(3).unwrap(), 0b101);
//! assert_eq!(r.read_u16(11).unwrap(), 0x3C0);
//! assert!(r.read_bool().unwrap());
//! ```
//!
//! Whole bytes written at a byte boundary come out as plain endianness, so
//! a `BitWriter` can interleave flag bits with ordinary integers.

pub mod cursor;
pub mod error;
mod order;
mod reader;
mod writer;

pub use cursor::BitCursor;
pub use error::BitError;
pub use order::{BitOrder, ByteOrderSpec};
pub use reader::BitReader;
pub use typed_view::ByteOrder;
pub use writer::BitWriter;
