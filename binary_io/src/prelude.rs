//! Convenience re-exports for common usage

pub use crate::error::{Error, Result};
pub use crate::frame::{FrameBuilder, LengthPrefix, read_frame};

// Streams
pub use pooled_bytes::{LinearStream, ReverseStream, RingStream, SharedPool};

// Typed values
pub use typed_view::{ByteOrder, I24, SwapLayout, U24, ValueReader, ValueWriter, cast, swap};

// Bits
pub use bit_codec::{BitOrder, BitReader, BitWriter, ByteOrderSpec};

// Derive support. Without direct `bytemuck`/`typed_view` dependencies, add
// `#[bytemuck(crate = "binary_io::bytemuck")]` and
// `#[swap_layout(crate = "binary_io::typed_view")]` to the deriving type.
pub use bytemuck::{Pod, Zeroable};
pub use bytemuck_derive::{Pod, Zeroable};
