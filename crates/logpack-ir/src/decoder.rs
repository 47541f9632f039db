//! IR stream framing and the per-message decode state machine.

use std::borrow::Cow;

use crate::constants::{
    metadata, payload, EpochTimeMs, EIGHT_BYTE_ENCODING_MAGIC_NUMBER,
    FOUR_BYTE_ENCODING_MAGIC_NUMBER, MAGIC_NUMBER_LENGTH,
};
use crate::encoded_var::EncodedVariable;
use crate::error::IrError;
use crate::interpolate::interpolate;
use crate::reader::IrReader;

/// Stream encoding selected by the magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// 32-bit variable words, timestamp deltas.
    FourByte,
    /// 64-bit variable words, absolute timestamps.
    EightByte,
}

/// One decoded log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// The reconstructed message bytes: the logtype with every placeholder
    /// replaced by its variable's rendering.
    pub message: Vec<u8>,
    /// Absolute epoch milliseconds in eight-byte streams; the raw signed
    /// delta in four-byte streams (accumulation is the caller's concern).
    pub timestamp: EpochTimeMs,
}

impl LogEvent {
    /// The message as text, with invalid UTF-8 replaced.
    pub fn message_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.message)
    }
}

/// Width of a length prefix.
#[derive(Clone, Copy)]
enum LenWidth {
    U8,
    U16,
    I32,
}

/// Classifies `tag` in the variable-accumulation position: the `VAR_STR_LEN`
/// tags introduce a dictionary variable there. The same classification does
/// not hold in the logtype position; dispatch is positional, so each
/// position gets its own classifier.
fn dict_var_len_width(tag: u8) -> Option<LenWidth> {
    match tag {
        payload::VAR_STR_LEN_UBYTE => Some(LenWidth::U8),
        payload::VAR_STR_LEN_USHORT => Some(LenWidth::U16),
        payload::VAR_STR_LEN_INT => Some(LenWidth::I32),
        _ => None,
    }
}

/// Classifies `tag` in the logtype position, where only the `LOGTYPE_STR_LEN`
/// tags are valid.
fn logtype_len_width(tag: u8) -> Option<LenWidth> {
    match tag {
        payload::LOGTYPE_STR_LEN_UBYTE => Some(LenWidth::U8),
        payload::LOGTYPE_STR_LEN_USHORT => Some(LenWidth::U16),
        payload::LOGTYPE_STR_LEN_INT => Some(LenWidth::I32),
        _ => None,
    }
}

fn read_length<R: IrReader + ?Sized>(reader: &mut R, width: LenWidth) -> Result<usize, IrError> {
    match width {
        LenWidth::U8 => Ok(reader.try_u8()? as usize),
        LenWidth::U16 => Ok(reader.try_u16()? as usize),
        LenWidth::I32 => {
            let len = reader.try_i32()?;
            usize::try_from(len).map_err(|_| IrError::NegativeLength)
        }
    }
}

/// Reads the magic number and returns the encoding it selects.
pub fn get_encoding_mode<R: IrReader + ?Sized>(reader: &mut R) -> Result<EncodingMode, IrError> {
    let mut magic = [0u8; MAGIC_NUMBER_LENGTH];
    reader.try_read_exact(&mut magic)?;
    if magic == FOUR_BYTE_ENCODING_MAGIC_NUMBER {
        Ok(EncodingMode::FourByte)
    } else if magic == EIGHT_BYTE_ENCODING_MAGIC_NUMBER {
        Ok(EncodingMode::EightByte)
    } else {
        Err(IrError::InvalidMagicNumber)
    }
}

/// Reads the metadata descriptor up to, but not including, the payload.
fn read_metadata_info<R: IrReader + ?Sized>(reader: &mut R) -> Result<(u8, u16), IrError> {
    let metadata_type = reader.try_u8()?;
    let metadata_size = match reader.try_u8()? {
        metadata::LENGTH_UBYTE => u16::from(reader.try_u8()?),
        metadata::LENGTH_USHORT => reader.try_u16()?,
        _ => return Err(IrError::InvalidMetadataLengthTag),
    };
    Ok((metadata_type, metadata_size))
}

/// Reads the metadata descriptor that follows the magic number, returning
/// the metadata type tag and the payload bytes.
pub fn decode_preamble<R: IrReader + ?Sized>(reader: &mut R) -> Result<(u8, Vec<u8>), IrError> {
    let (metadata_type, metadata_size) = read_metadata_info(reader)?;
    let metadata = reader.try_read_string(metadata_size as usize)?;
    Ok((metadata_type, metadata))
}

/// Like [`decode_preamble`], but returns the payload's position and size and
/// seeks past it instead of reading it, for callers that map the stream into
/// memory and want to slice the metadata themselves.
pub fn decode_preamble_by_position<R: IrReader + ?Sized>(
    reader: &mut R,
) -> Result<(u8, usize, u16), IrError> {
    let (metadata_type, metadata_size) = read_metadata_info(reader)?;
    let metadata_pos = reader.pos();
    reader.try_seek_from_begin(metadata_pos + metadata_size as usize)?;
    Ok((metadata_type, metadata_pos, metadata_size))
}

/// Decodes one message: variables, logtype, timestamp, then interpolation.
///
/// Returns `Ok(None)` when the tag at the current position is the clean
/// end-of-stream marker.
fn decode_next_message<V: EncodedVariable, R: IrReader + ?Sized>(
    reader: &mut R,
) -> Result<Option<LogEvent>, IrError> {
    let mut tag = reader.try_u8()?;
    if tag == payload::EOF {
        return Ok(None);
    }

    let mut encoded_vars: Vec<V> = Vec::new();
    let mut dict_vars: Vec<Vec<u8>> = Vec::new();
    loop {
        if tag == V::VAR_TAG {
            encoded_vars.push(V::read_from(reader)?);
        } else if let Some(width) = dict_var_len_width(tag) {
            let var_len = read_length(reader, width)?;
            dict_vars.push(reader.try_read_string(var_len)?);
        } else {
            break;
        }
        tag = reader.try_u8()?;
    }

    let width = logtype_len_width(tag).ok_or(IrError::UnexpectedTag)?;
    let logtype_len = read_length(reader, width)?;
    let logtype = reader.try_read_string(logtype_len)?;

    let tag = reader.try_u8()?;
    let timestamp = V::parse_timestamp(reader, tag)?;

    let message = interpolate(&logtype, &encoded_vars, &dict_vars)?;
    Ok(Some(LogEvent { message, timestamp }))
}

/// Message decoding for four-byte streams.
pub mod four_byte {
    use super::*;

    /// Decodes the next message; the event's timestamp field is the raw
    /// signed delta carried by the message.
    pub fn decode_next_message<R: IrReader + ?Sized>(
        reader: &mut R,
    ) -> Result<Option<LogEvent>, IrError> {
        super::decode_next_message::<i32, R>(reader)
    }
}

/// Message decoding for eight-byte streams.
pub mod eight_byte {
    use super::*;

    /// Decodes the next message; the event's timestamp field is the absolute
    /// epoch-millisecond timestamp carried by the message.
    pub fn decode_next_message<R: IrReader + ?Sized>(
        reader: &mut R,
    ) -> Result<Option<LogEvent>, IrError> {
        super::decode_next_message::<i64, R>(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logpack_buffers::{Reader, Writer};

    #[test]
    fn len_tags_classify_by_position() {
        // Dictionary length tags are not logtype length tags, and vice versa.
        for tag in [
            payload::VAR_STR_LEN_UBYTE,
            payload::VAR_STR_LEN_USHORT,
            payload::VAR_STR_LEN_INT,
        ] {
            assert!(dict_var_len_width(tag).is_some());
            assert!(logtype_len_width(tag).is_none());
        }
        for tag in [
            payload::LOGTYPE_STR_LEN_UBYTE,
            payload::LOGTYPE_STR_LEN_USHORT,
            payload::LOGTYPE_STR_LEN_INT,
        ] {
            assert!(logtype_len_width(tag).is_some());
            assert!(dict_var_len_width(tag).is_none());
        }
        assert!(dict_var_len_width(payload::VAR_FOUR_BYTE_ENCODING).is_none());
        assert!(logtype_len_width(payload::TIMESTAMP_VAL).is_none());
    }

    #[test]
    fn negative_int_length_is_corruption() {
        let mut w = Writer::new();
        w.i32(-1);
        let data = w.flush();
        let mut r = Reader::new(&data);
        assert_eq!(
            read_length(&mut r, LenWidth::I32),
            Err(IrError::NegativeLength)
        );
    }

    #[test]
    fn wide_lengths_read_big_endian() {
        let mut w = Writer::new();
        w.u16(0x0201);
        w.i32(70_000);
        let data = w.flush();
        let mut r = Reader::new(&data);
        assert_eq!(read_length(&mut r, LenWidth::U16), Ok(0x0201));
        assert_eq!(read_length(&mut r, LenWidth::I32), Ok(70_000));
    }

    #[test]
    fn unknown_magic_is_invalid() {
        let data = *b"NOPE";
        let mut r = Reader::new(&data);
        assert_eq!(
            get_encoding_mode(&mut r),
            Err(IrError::InvalidMagicNumber)
        );
    }

    #[test]
    fn truncated_magic_is_short_read() {
        let data = [0xFD, 0x2F];
        let mut r = Reader::new(&data);
        assert_eq!(get_encoding_mode(&mut r), Err(IrError::UnexpectedEof));
    }

    #[test]
    fn metadata_info_rejects_unknown_length_tag() {
        let mut w = Writer::new();
        w.u8(metadata::ENCODING_JSON);
        w.u8(0x7F);
        let data = w.flush();
        let mut r = Reader::new(&data);
        assert_eq!(
            read_metadata_info(&mut r),
            Err(IrError::InvalidMetadataLengthTag)
        );
    }

    #[test]
    fn metadata_info_reads_both_widths() {
        let mut w = Writer::new();
        w.u8(metadata::ENCODING_JSON);
        w.u8(metadata::LENGTH_UBYTE);
        w.u8(5);
        w.u8(metadata::ENCODING_JSON);
        w.u8(metadata::LENGTH_USHORT);
        w.u16(600);
        let data = w.flush();
        let mut r = Reader::new(&data);
        assert_eq!(read_metadata_info(&mut r), Ok((metadata::ENCODING_JSON, 5)));
        assert_eq!(
            read_metadata_info(&mut r),
            Ok((metadata::ENCODING_JSON, 600))
        );
    }

    #[test]
    fn logtype_tag_without_variables_is_valid() {
        // A logtype tag straight away means zero variables, not corruption.
        let mut w = Writer::new();
        w.u8(payload::LOGTYPE_STR_LEN_UBYTE);
        w.u8(2);
        w.buf(b"ok");
        w.u8(payload::TIMESTAMP_VAL);
        w.i64(7);
        let data = w.flush();
        let mut r = Reader::new(&data);
        let event = eight_byte::decode_next_message(&mut r).unwrap().unwrap();
        assert_eq!(event.message, b"ok");
        assert_eq!(event.timestamp, 7);
    }
}
