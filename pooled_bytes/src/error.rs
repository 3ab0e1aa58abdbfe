use std::io;

use thiserror::Error;

/// Pooled stream errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The stream was disposed and its array returned to the pool
    #[error("stream has been disposed")]
    Disposed,

    /// Index, length or position outside the valid bounds
    #[error("{what} {value} out of range (limit {limit})")]
    OutOfRange {
        what: &'static str,
        value: i128,
        limit: u64,
    },

    /// Read requested past the available data
    #[error("unexpected end of stream")]
    EndOfStream,

    /// Malformed configuration
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not supported by this stream variant
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl StreamError {
    pub(crate) fn out_of_range(what: &'static str, value: impl Into<i128>, limit: usize) -> Self {
        StreamError::OutOfRange {
            what,
            value: value.into(),
            limit: limit as u64,
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        let kind = match err {
            StreamError::OutOfRange { .. } | StreamError::InvalidArgument(_) => {
                io::ErrorKind::InvalidInput
            }
            StreamError::EndOfStream => io::ErrorKind::UnexpectedEof,
            StreamError::Unsupported(_) => io::ErrorKind::Unsupported,
            StreamError::Disposed => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
