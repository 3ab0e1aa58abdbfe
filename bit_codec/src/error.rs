use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BitError {
    #[error("bit length {len} must be in the range {min}..={max}")]
    OutOfRange { len: u32, min: u32, max: u32 },

    #[error("unexpected end of stream")]
    EndOfStream,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[source] io::Error),
}

impl BitError {
    /// Fails unless `len` lies in `1..=max`.
    pub(crate) fn check_len(len: u32, max: u32) -> Result<(), BitError> {
        if len == 0 || len > max {
            return Err(BitError::OutOfRange { len, min: 1, max });
        }
        Ok(())
    }
}

impl From<io::Error> for BitError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            BitError::EndOfStream
        } else {
            BitError::Io(err)
        }
    }
}

impl From<typed_view::ViewError> for BitError {
    fn from(err: typed_view::ViewError) -> Self {
        BitError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_maps_to_end_of_stream() {
        let err: BitError = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(err, BitError::EndOfStream));

        let err: BitError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(err, BitError::Io(_)));
    }

    #[test]
    fn length_checks() {
        assert!(BitError::check_len(1, 8).is_ok());
        assert!(BitError::check_len(64, 64).is_ok());
        assert!(matches!(
            BitError::check_len(0, 64),
            Err(BitError::OutOfRange { len: 0, min: 1, max: 64 })
        ));
        assert!(matches!(
            BitError::check_len(9, 8),
            Err(BitError::OutOfRange { len: 9, .. })
        ));
    }
}
