//! Decoder for the logpack IR stream.
//!
//! An IR stream is a compact binary encoding of log events. Each event is a
//! *logtype*, the static skeleton of a log line with placeholder bytes,
//! plus the variables those placeholders stand for (numeric values packed
//! into fixed-width words, strings carried inline) and a timestamp. Streams
//! come in two encodings, selected by the stream's magic number:
//!
//! - *eight-byte*: 64-bit variable words, absolute epoch-millisecond
//!   timestamps;
//! - *four-byte*: 32-bit variable words, signed timestamp deltas relative to
//!   a running timestamp the caller maintains.
//!
//! Decoding is pull-based: [`get_encoding_mode`] and [`decode_preamble`]
//! consume the stream head, then [`four_byte::decode_next_message`] or
//! [`eight_byte::decode_next_message`] is called once per event until it
//! returns `Ok(None)` at the end-of-stream marker.
//!
//! ```
//! use logpack_buffers::Reader;
//! use logpack_ir::constants::{payload, FOUR_BYTE_ENCODING_MAGIC_NUMBER};
//! use logpack_ir::{four_byte, get_encoding_mode, EncodingMode};
//!
//! let mut data = FOUR_BYTE_ENCODING_MAGIC_NUMBER.to_vec();
//! data.push(payload::EOF);
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(get_encoding_mode(&mut reader), Ok(EncodingMode::FourByte));
//! assert_eq!(four_byte::decode_next_message(&mut reader), Ok(None));
//! ```

pub mod constants;
mod decoder;
mod encoded_var;
mod error;
mod interpolate;
mod reader;

pub use decoder::{
    decode_preamble, decode_preamble_by_position, eight_byte, four_byte, get_encoding_mode,
    EncodingMode, LogEvent,
};
pub use encoded_var::EncodedVariable;
pub use error::IrError;
pub use reader::IrReader;
