//! Session State
//!
//! Per-connection record of what the handshake negotiated. Owned by the
//! [`Connection`](crate::network::Connection); populated once by the
//! handshake, read by every administrative command.

use bytes::Bytes;

use crate::error::{Result, WireError};
use crate::protocol::NO_SESSION;

#[derive(Debug, Clone)]
pub struct SessionState {
    /// Binary protocol version announced at handshake
    protocol_version: i16,

    /// Record serialization format announced at handshake
    serialization_format: String,

    /// Server-assigned session id, `NO_SESSION` until the handshake succeeds
    session_id: i32,

    /// Opaque token returned by the server (may be empty)
    auth_token: Bytes,
}

impl SessionState {
    pub fn new(protocol_version: i16, serialization_format: impl Into<String>) -> Self {
        Self {
            protocol_version,
            serialization_format: serialization_format.into(),
            session_id: NO_SESSION,
            auth_token: Bytes::new(),
        }
    }

    pub fn protocol_version(&self) -> i16 {
        self.protocol_version
    }

    pub fn serialization_format(&self) -> &str {
        &self.serialization_format
    }

    pub fn session_id(&self) -> i32 {
        self.session_id
    }

    pub fn auth_token(&self) -> &[u8] {
        &self.auth_token
    }

    pub fn is_established(&self) -> bool {
        self.session_id != NO_SESSION
    }

    /// Session id to put on an outgoing command
    pub fn require_session(&self) -> Result<i32> {
        if !self.is_established() {
            return Err(WireError::SessionNotInitialized);
        }
        Ok(self.session_id)
    }

    pub(crate) fn establish(&mut self, session_id: i32, auth_token: impl Into<Bytes>) {
        self.session_id = session_id;
        self.auth_token = auth_token.into();
    }

    pub fn clear(&mut self) {
        self.session_id = NO_SESSION;
        self.auth_token = Bytes::new();
    }
}
