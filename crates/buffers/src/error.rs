//! Buffer error type.

use thiserror::Error;

/// Error type for bounds-checked buffer operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer")]
    EndOfBuffer,
}
