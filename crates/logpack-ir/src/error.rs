//! IR decoding error type.

use thiserror::Error;

/// Error type for IR stream decoding.
///
/// Variants fall into three classes. `UnexpectedEof` means the reader could
/// not supply the requested bytes; the stream itself may still be fine and a
/// caller with buffering can retry from a checkpoint before the failing
/// message. The corruption variants (see [`IrError::is_corrupted`]) are
/// framing violations and fatal for the stream. The decode-error variants
/// (see [`IrError::is_decode_error`]) mean a well-framed message whose
/// logtype cannot be reconstructed from the variables provided; they are
/// equally fatal because the variable indices are no longer trustworthy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IrError {
    /// The reader ran out of bytes mid-read.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The stream does not start with a known magic number.
    #[error("invalid magic number")]
    InvalidMagicNumber,

    /// The metadata descriptor carries an unknown length-encoding tag.
    #[error("invalid metadata length tag")]
    InvalidMetadataLengthTag,

    /// A tag byte is not valid at its position in the stream.
    #[error("unexpected tag byte")]
    UnexpectedTag,

    /// A signed length prefix is negative.
    #[error("negative length prefix")]
    NegativeLength,

    /// The logtype references more encoded variables than the message carries.
    #[error("logtype references more encoded variables than provided")]
    TooFewEncodedVars,

    /// The logtype references more dictionary variables than the message carries.
    #[error("logtype references more dictionary variables than provided")]
    TooFewDictVars,

    /// The logtype ends with an escape byte that escapes nothing.
    #[error("logtype ends with an unescaped escape byte")]
    TrailingEscape,

    /// An encoded-variable word is not a valid float encoding.
    #[error("invalid float variable encoding")]
    InvalidFloatEncoding,
}

impl IrError {
    /// Whether this error is a stream-framing violation.
    pub fn is_corrupted(&self) -> bool {
        matches!(
            self,
            IrError::InvalidMagicNumber
                | IrError::InvalidMetadataLengthTag
                | IrError::UnexpectedTag
                | IrError::NegativeLength
        )
    }

    /// Whether this error is a well-framed message that cannot be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            IrError::TooFewEncodedVars
                | IrError::TooFewDictVars
                | IrError::TrailingEscape
                | IrError::InvalidFloatEncoding
        )
    }
}
