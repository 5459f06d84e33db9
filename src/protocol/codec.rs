//! Protocol codec
//!
//! Encoding and decoding of the primitive field types.
//!
//! ## Wire Format
//! ```text
//! byte    1 byte
//! short   2 bytes, signed, big-endian
//! int     4 bytes, signed, big-endian
//! bool    1 byte (0 = false, anything else = true)
//! string  int length + UTF-8 bytes   (length -1 = null)
//! bytes   int length + raw bytes     (length -1 = null, read as empty)
//! ```

use std::io::Read;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Maximum length of a single string/blob field (16 MB)
pub const MAX_FIELD_SIZE: usize = 16 * 1024 * 1024;

/// Length prefix value standing for a null string or blob
const NULL_LENGTH: i32 = -1;

// =============================================================================
// Encoding
// =============================================================================

/// Accumulates one outgoing message
///
/// The finished message is written to the transport in a single write.
#[derive(Debug, Default)]
pub struct MessageWriter {
    buf: BytesMut,
}

impl MessageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn put_byte(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn put_short(&mut self, value: i16) {
        self.buf.put_i16(value);
    }

    pub fn put_int(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(value as u8);
    }

    /// Length-prefixed UTF-8 string
    pub fn put_string(&mut self, value: &str) -> Result<()> {
        self.put_bytes(value.as_bytes())
    }

    /// Null string/blob marker
    pub fn put_null(&mut self) {
        self.buf.put_i32(NULL_LENGTH);
    }

    /// Length-prefixed byte blob
    ///
    /// Fields above `MAX_FIELD_SIZE` are rejected and nothing is written.
    pub fn put_bytes(&mut self, value: &[u8]) -> Result<()> {
        let len = match i32::try_from(value.len()) {
            Ok(len) if value.len() <= MAX_FIELD_SIZE => len,
            _ => {
                return Err(WireError::FieldTooLarge {
                    len: value.len(),
                    max: MAX_FIELD_SIZE,
                })
            }
        };

        self.buf.reserve(4 + value.len());
        self.buf.put_i32(len);
        self.buf.put_slice(value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

// =============================================================================
// Decoding
// =============================================================================

pub fn read_byte<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub fn read_short<R: Read>(reader: &mut R) -> Result<i16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

pub fn read_int<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

pub fn read_bool<R: Read>(reader: &mut R) -> Result<bool> {
    Ok(read_byte(reader)? != 0)
}

/// Read a length-prefixed blob; a null blob reads as empty
pub fn read_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    Ok(read_field(reader)?.unwrap_or_default())
}

/// Read a string that the server may send as null
pub fn read_nullable_string<R: Read>(reader: &mut R) -> Result<Option<String>> {
    match read_field(reader)? {
        Some(raw) => String::from_utf8(raw)
            .map(Some)
            .map_err(|e| WireError::Protocol(format!("String field is not valid UTF-8: {}", e))),
        None => Ok(None),
    }
}

/// Read a string that must not be null
pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    read_nullable_string(reader)?
        .ok_or_else(|| WireError::Protocol("Unexpected null string".to_string()))
}

/// Read a length prefix and the body it announces
fn read_field<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let len = read_int(reader)?;
    if len == NULL_LENGTH {
        return Ok(None);
    }
    if len < 0 {
        return Err(WireError::Protocol(format!(
            "Negative field length: {}",
            len
        )));
    }

    let len = len as usize;
    if len > MAX_FIELD_SIZE {
        return Err(WireError::Protocol(format!(
            "Field too large: {} bytes (max {})",
            len, MAX_FIELD_SIZE
        )));
    }

    let mut body = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut body)?;
    }
    Ok(Some(body))
}
