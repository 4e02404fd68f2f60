//! Error type shared by strategies, the harness and the timing record

use std::fmt;
use std::io;

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, InterleaveError>;

#[derive(Debug)]
pub enum InterleaveError {
    /// Element count must split evenly across the four functions
    UnevenElementCount(usize),

    /// Transformation matrix does not fit in the configured memory limit
    /// (or the allocator refused it)
    InsufficientMemory {
        requested_bytes: Option<u64>,
        limit_bytes: u64,
    },

    /// ndarray rejected a stack/concatenate shape
    Shape(ndarray::ShapeError),

    Io(io::Error),
    Encode(bincode::error::EncodeError),
    Decode(bincode::error::DecodeError),

    /// Timing record file does not start with the expected magic bytes
    BadMagic([u8; 4]),
    UnsupportedVersion(u32),
}

impl fmt::Display for InterleaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterleaveError::UnevenElementCount(n) => {
                write!(f, "element count {} is not a multiple of 4", n)
            }
            InterleaveError::InsufficientMemory {
                requested_bytes: Some(bytes),
                limit_bytes,
            } => write!(
                f,
                "failed to allocate memory: transformation matrix needs {} bytes (limit {})",
                bytes, limit_bytes
            ),
            InterleaveError::InsufficientMemory {
                requested_bytes: None,
                limit_bytes,
            } => write!(
                f,
                "failed to allocate memory: transformation matrix size overflows u64 (limit {})",
                limit_bytes
            ),
            InterleaveError::Shape(e) => write!(f, "shape error: {}", e),
            InterleaveError::Io(e) => write!(f, "I/O error: {}", e),
            InterleaveError::Encode(e) => write!(f, "failed to encode timing record: {}", e),
            InterleaveError::Decode(e) => write!(f, "failed to decode timing record: {}", e),
            InterleaveError::BadMagic(magic) => {
                write!(f, "invalid timing record magic: {:?}", magic)
            }
            InterleaveError::UnsupportedVersion(v) => {
                write!(f, "unsupported timing record version: {}", v)
            }
        }
    }
}

impl std::error::Error for InterleaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterleaveError::Shape(e) => Some(e),
            InterleaveError::Io(e) => Some(e),
            InterleaveError::Encode(e) => Some(e),
            InterleaveError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ndarray::ShapeError> for InterleaveError {
    fn from(e: ndarray::ShapeError) -> Self {
        InterleaveError::Shape(e)
    }
}

impl From<io::Error> for InterleaveError {
    fn from(e: io::Error) -> Self {
        InterleaveError::Io(e)
    }
}

impl From<bincode::error::EncodeError> for InterleaveError {
    fn from(e: bincode::error::EncodeError) -> Self {
        InterleaveError::Encode(e)
    }
}

impl From<bincode::error::DecodeError> for InterleaveError {
    fn from(e: bincode::error::DecodeError) -> Self {
        InterleaveError::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_memory_message() {
        let e = InterleaveError::InsufficientMemory {
            requested_bytes: Some(2048),
            limit_bytes: 1024,
        };
        let msg = e.to_string();
        assert!(msg.starts_with("failed to allocate memory"));
        assert!(msg.contains("2048"));
    }

    #[test]
    fn test_io_error_has_source() {
        let e: InterleaveError = io::Error::new(io::ErrorKind::NotFound, "times.dat").into();
        assert!(std::error::Error::source(&e).is_some());
    }
}
