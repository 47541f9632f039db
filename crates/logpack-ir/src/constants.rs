//! IR stream protocol constants.
//!
//! Every multi-byte numeric field on the wire (length prefixes, variable
//! words, timestamps) is big-endian. Tag bytes are single unsigned bytes.

/// Epoch timestamp in milliseconds (or a delta thereof in four-byte streams).
pub type EpochTimeMs = i64;

/// Length of the magic number prefixing every stream.
pub const MAGIC_NUMBER_LENGTH: usize = 4;

/// Magic number selecting the four-byte encoding.
pub const FOUR_BYTE_ENCODING_MAGIC_NUMBER: [u8; MAGIC_NUMBER_LENGTH] = [0xFD, 0x2F, 0xB5, 0x30];

/// Magic number selecting the eight-byte encoding.
pub const EIGHT_BYTE_ENCODING_MAGIC_NUMBER: [u8; MAGIC_NUMBER_LENGTH] = [0xFD, 0x2F, 0xB5, 0x29];

/// Tags appearing in the message section of a stream.
pub mod payload {
    /// Clean end-of-stream marker.
    pub const EOF: u8 = 0x00;

    /// Dictionary variable with a u8 length prefix.
    pub const VAR_STR_LEN_UBYTE: u8 = 0x11;
    /// Dictionary variable with a u16 length prefix.
    pub const VAR_STR_LEN_USHORT: u8 = 0x12;
    /// Dictionary variable with an i32 length prefix.
    pub const VAR_STR_LEN_INT: u8 = 0x13;

    /// One 32-bit encoded-variable word (four-byte streams only).
    pub const VAR_FOUR_BYTE_ENCODING: u8 = 0x18;
    /// One 64-bit encoded-variable word (eight-byte streams only).
    pub const VAR_EIGHT_BYTE_ENCODING: u8 = 0x19;

    /// Logtype with a u8 length prefix.
    pub const LOGTYPE_STR_LEN_UBYTE: u8 = 0x21;
    /// Logtype with a u16 length prefix.
    pub const LOGTYPE_STR_LEN_USHORT: u8 = 0x22;
    /// Logtype with an i32 length prefix.
    pub const LOGTYPE_STR_LEN_INT: u8 = 0x23;

    /// 64-bit absolute timestamp (eight-byte streams only).
    pub const TIMESTAMP_VAL: u8 = 0x30;
    /// 8-bit timestamp delta (four-byte streams only).
    pub const TIMESTAMP_DELTA_BYTE: u8 = 0x31;
    /// 16-bit timestamp delta (four-byte streams only).
    pub const TIMESTAMP_DELTA_SHORT: u8 = 0x32;
    /// 32-bit timestamp delta (four-byte streams only).
    pub const TIMESTAMP_DELTA_INT: u8 = 0x33;
}

/// Tags appearing in the metadata descriptor of the preamble.
pub mod metadata {
    /// Metadata payload is JSON.
    pub const ENCODING_JSON: u8 = 0x01;

    /// Metadata length is a u8.
    pub const LENGTH_UBYTE: u8 = 0x11;
    /// Metadata length is a u16.
    pub const LENGTH_USHORT: u8 = 0x12;
}

/// Placeholder bytes inside logtype strings.
///
/// Any logtype byte equal to one of the three placeholder values is a
/// placeholder unless preceded by [`ESCAPE`], which makes the following byte
/// literal.
pub mod placeholder {
    /// Stands for one encoded variable rendered as an integer.
    pub const INTEGER: u8 = 0x11;
    /// Stands for one dictionary variable.
    pub const DICTIONARY: u8 = 0x12;
    /// Stands for one encoded variable rendered as a float.
    pub const FLOAT: u8 = 0x13;
    /// Makes the next logtype byte literal.
    pub const ESCAPE: u8 = b'\\';
}
