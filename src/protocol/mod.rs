//! Protocol Module
//!
//! Defines the binary wire protocol spoken with the database server.
//! All integers are big-endian; strings and blobs carry a 4-byte signed
//! length prefix, with `-1` standing for null.
//!
//! ### Request Format
//! ```text
//! ┌──────────┬────────────────┬─────────────────────────────┐
//! │Opcode (1)│ Session Id (4) │   Opcode-specific fields    │
//! └──────────┴────────────────┴─────────────────────────────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌──────────┬────────────────┬─────────────────────────────┐
//! │Status(1) │ Session Id (4) │   Payload or exceptions     │
//! └──────────┴────────────────┴─────────────────────────────┘
//! ```
//!
//! ### Opcodes
//! - 2:  CONNECT   - open a server (admin) session
//! - 4:  DB_CREATE - name, database kind, storage kind
//! - 6:  DB_EXIST  - name, storage kind → bool
//! - 7:  DB_DROP   - name, database kind
//! - 74: DB_LIST   - → opaque blob
//!
//! ### Status Codes
//! - 0x00: SUCCESS
//! - 0x01: ERROR (followed by exception descriptors)

mod command;
mod response;
mod codec;
mod kinds;

pub use command::{Arg, Opcode, Request};
pub use response::{expect_session, read_exceptions, read_response_header, read_status, Status};
pub use codec::{
    read_bool, read_byte, read_bytes, read_int, read_nullable_string, read_short, read_string,
    MessageWriter, MAX_FIELD_SIZE,
};
pub use kinds::{DatabaseKind, StorageKind};

/// Session id sent in the CONNECT request to ask for a new session
pub const NEW_SESSION: i32 = -4;

/// Session State sentinel meaning "no session established"
pub const NO_SESSION: i32 = -1;

/// Binary protocol version announced by default
pub const DEFAULT_PROTOCOL_VERSION: i16 = 28;

/// Record serialization format announced by default
pub const DEFAULT_SERIALIZATION_FORMAT: &str = "ORecordSerializerBinary";

/// Driver name announced at handshake
pub const DRIVER_NAME: &str = "odbwire Rust client";

/// Driver version announced at handshake
pub const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");
