use std::io;

use thiserror::Error;

/// Errors raised by typed views and value streams
#[derive(Debug, Error)]
pub enum ViewError {
    /// The byte count of the source does not divide into whole targets
    #[error("{bytes} bytes cannot be viewed as elements of {elem} bytes")]
    SizeMismatch { bytes: usize, elem: usize },

    /// The source is not aligned for the target element type
    #[error("source is not aligned to {align} bytes")]
    Misaligned { align: usize },

    /// A hand-written layout does not cover the type exactly
    #[error("layout of {type_name} describes {described} bytes, type is {size} bytes")]
    InvalidLayout {
        type_name: &'static str,
        described: usize,
        size: usize,
    },

    #[error("element {index} out of range for {len} elements")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unexpected end of stream")]
    EndOfStream,

    #[error("IO error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for ViewError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ViewError::EndOfStream
        } else {
            ViewError::Io(err)
        }
    }
}
