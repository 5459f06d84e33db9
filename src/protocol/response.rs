//! Response decoding
//!
//! Every response starts with a status byte and the echoed session id.
//! ERROR responses continue with exception descriptors:
//!
//! ```text
//! ┌──────────┬────────────────┬──────────────────────┐
//! │hasMore(1)│ className (str)│ message (str | null) │ ... hasMore = 0
//! └──────────┴────────────────┴──────────────────────┘
//! ```

use std::io::Read;

use super::codec::{read_byte, read_int, read_nullable_string, read_string};
use crate::error::{Result, ServerErrors, ServerException, WireError};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Success = 0x00,
    Error = 0x01,
}

impl Status {
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(Status::Success),
            0x01 => Ok(Status::Error),
            _ => Err(WireError::Protocol(format!(
                "Unknown response status: 0x{:02x}",
                byte
            ))),
        }
    }
}

pub fn read_status<R: Read>(reader: &mut R) -> Result<Status> {
    Status::from_byte(read_byte(reader)?)
}

/// Read the echoed session id and check it against what was sent
pub fn expect_session<R: Read>(reader: &mut R, expected: i32) -> Result<()> {
    let actual = read_int(reader)?;
    if actual != expected {
        return Err(WireError::SessionMismatch { expected, actual });
    }
    Ok(())
}

/// Read exception descriptors until the terminating marker
pub fn read_exceptions<R: Read>(reader: &mut R) -> Result<Vec<ServerException>> {
    let mut exceptions = Vec::new();

    loop {
        match read_byte(reader)? {
            0 => break,
            1 => {
                let class_name = read_string(reader)?;
                let message = read_nullable_string(reader)?;
                exceptions.push(ServerException {
                    class_name,
                    message,
                });
            }
            other => {
                return Err(WireError::Protocol(format!(
                    "Invalid exception continuation marker: {}",
                    other
                )))
            }
        }
    }

    Ok(exceptions)
}

/// Read status and session echo; turn an ERROR status into `WireError::Server`
///
/// On `Ok(())` the stream is positioned at the command-specific payload.
pub fn read_response_header<R: Read>(reader: &mut R, expected_session: i32) -> Result<()> {
    let status = read_status(reader)?;
    expect_session(reader, expected_session)?;

    if status == Status::Error {
        let exceptions = read_exceptions(reader)?;
        return Err(WireError::Server(ServerErrors(exceptions)));
    }

    Ok(())
}
