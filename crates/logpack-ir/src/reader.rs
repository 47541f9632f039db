//! Sequential reader contract consumed by the decoder.

use logpack_buffers::Reader;

use crate::error::IrError;

/// A sequential byte source the decoder pulls from.
///
/// Implementations supply exact-length reads, position telling, and seeking
/// from the stream start; any transport failure surfaces as
/// [`IrError::UnexpectedEof`]. The fixed-width integer reads are provided on
/// top of [`try_read_exact`](IrReader::try_read_exact) and decode the wire's
/// big-endian byte order, preserving sign through two's complement.
pub trait IrReader {
    /// Fills `dst` from the stream or fails without consuming it.
    fn try_read_exact(&mut self, dst: &mut [u8]) -> Result<(), IrError>;

    /// Reads a byte string of exactly `len` bytes.
    fn try_read_string(&mut self, len: usize) -> Result<Vec<u8>, IrError>;

    /// Current position, in bytes from the start of the stream.
    fn pos(&self) -> usize;

    /// Repositions to `pos` bytes from the start of the stream.
    fn try_seek_from_begin(&mut self, pos: usize) -> Result<(), IrError>;

    /// Reads an unsigned 8-bit integer.
    #[inline]
    fn try_u8(&mut self) -> Result<u8, IrError> {
        let mut bytes = [0u8; 1];
        self.try_read_exact(&mut bytes)?;
        Ok(bytes[0])
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    fn try_i8(&mut self) -> Result<i8, IrError> {
        let mut bytes = [0u8; 1];
        self.try_read_exact(&mut bytes)?;
        Ok(bytes[0] as i8)
    }

    /// Reads an unsigned 16-bit big-endian integer.
    #[inline]
    fn try_u16(&mut self) -> Result<u16, IrError> {
        let mut bytes = [0u8; 2];
        self.try_read_exact(&mut bytes)?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Reads a signed 16-bit big-endian integer.
    #[inline]
    fn try_i16(&mut self) -> Result<i16, IrError> {
        let mut bytes = [0u8; 2];
        self.try_read_exact(&mut bytes)?;
        Ok(i16::from_be_bytes(bytes))
    }

    /// Reads an unsigned 32-bit big-endian integer.
    #[inline]
    fn try_u32(&mut self) -> Result<u32, IrError> {
        let mut bytes = [0u8; 4];
        self.try_read_exact(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Reads a signed 32-bit big-endian integer.
    #[inline]
    fn try_i32(&mut self) -> Result<i32, IrError> {
        let mut bytes = [0u8; 4];
        self.try_read_exact(&mut bytes)?;
        Ok(i32::from_be_bytes(bytes))
    }

    /// Reads an unsigned 64-bit big-endian integer.
    #[inline]
    fn try_u64(&mut self) -> Result<u64, IrError> {
        let mut bytes = [0u8; 8];
        self.try_read_exact(&mut bytes)?;
        Ok(u64::from_be_bytes(bytes))
    }

    /// Reads a signed 64-bit big-endian integer.
    #[inline]
    fn try_i64(&mut self) -> Result<i64, IrError> {
        let mut bytes = [0u8; 8];
        self.try_read_exact(&mut bytes)?;
        Ok(i64::from_be_bytes(bytes))
    }
}

/// In-memory transport.
impl IrReader for Reader<'_> {
    fn try_read_exact(&mut self, dst: &mut [u8]) -> Result<(), IrError> {
        Reader::try_read_exact(self, dst).map_err(|_| IrError::UnexpectedEof)
    }

    fn try_read_string(&mut self, len: usize) -> Result<Vec<u8>, IrError> {
        let bytes = self.try_buf(len).map_err(|_| IrError::UnexpectedEof)?;
        Ok(bytes.to_vec())
    }

    fn pos(&self) -> usize {
        Reader::pos(self)
    }

    fn try_seek_from_begin(&mut self, pos: usize) -> Result<(), IrError> {
        self.seek(pos).map_err(|_| IrError::UnexpectedEof)
    }
}
