use thiserror::Error;

use bit_codec::BitError;
use pooled_bytes::StreamError;
use typed_view::ViewError;

/// Any failure raised by the binary I/O stack
#[derive(Debug, Error)]
pub enum Error {
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("view error: {0}")]
    View(#[from] ViewError),

    #[error("bit codec error: {0}")]
    Bits(#[from] BitError),

    #[error("frame payload of {len} bytes exceeds the {max}-byte limit of its length prefix")]
    FrameTooLarge { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
