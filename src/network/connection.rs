//! Client Connection
//!
//! Owns one transport and its Session State. Every call is a blocking
//! round trip: encode → write → read status → validate session → payload.

use std::io::{Read, Write};

use bytes::Bytes;

use super::transport::TcpTransport;
use crate::config::ClientConfig;
use crate::error::{ErrorKind, Result, WireError};
use crate::protocol::{
    expect_session, read_bool, read_bytes, read_exceptions, read_int, read_response_header,
    read_status, DatabaseKind, Opcode, Request, Status, StorageKind, NEW_SESSION, NO_SESSION,
};
use crate::session::SessionState;

/// Raw DB_LIST payload
///
/// The blob is a serialized name → location mapping; its layout is not
/// decoded at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseList(Bytes);

impl DatabaseList {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A client connection to the database server
pub struct Connection<T> {
    /// Duplex byte stream to the server
    transport: T,

    /// Negotiated session (empty until the handshake)
    session: SessionState,

    /// Driver identity announced at handshake
    driver_name: String,
    driver_version: String,

    /// Set once a transport error or protocol violation leaves the stream
    /// misaligned; every later call fails before writing
    broken: Option<ErrorKind>,
}

impl Connection<TcpTransport> {
    /// Open a TCP connection to `config.server_addr`
    ///
    /// No bytes are exchanged until the handshake.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let transport = TcpTransport::connect(config)?;
        tracing::debug!("Connected to {}", transport.peer_addr());
        Ok(Self::new(transport, config))
    }
}

impl<T: Read + Write> Connection<T> {
    /// Wrap an already-open transport
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            session: SessionState::new(config.protocol_version, config.serialization_format.clone()),
            driver_name: config.driver_name.clone(),
            driver_version: config.driver_version.clone(),
            broken: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether an earlier failure has made the stream unusable
    pub fn is_broken(&self) -> bool {
        self.broken.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Direct access to the transport
    ///
    /// Reading or writing behind the connection's back desynchronizes the stream.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Forget the session and hand back the transport
    pub fn close(mut self) -> T {
        tracing::debug!("Closing session {}", self.session.session_id());
        self.session.clear();
        self.transport
    }

    // =========================================================================
    // Handshake
    // =========================================================================

    /// Log in with server administrator credentials
    ///
    /// Must run once before any administrative command.
    pub fn open_server_session(&mut self, user: &str, password: &str) -> Result<()> {
        self.ensure_usable()?;
        if self.session.is_established() {
            return Err(WireError::SessionAlreadyEstablished(self.session.session_id()));
        }

        // Client id is null until clustered configs are supported; token
        // sessions are not negotiated.
        let request = Request::new(Opcode::Connect, NEW_SESSION)
            .string(self.driver_name.as_str())
            .string(self.driver_version.as_str())
            .short(self.session.protocol_version())
            .null()
            .string(self.session.serialization_format())
            .boolean(false)
            .string(user)
            .string(password);

        let result = self.send(&request).and_then(|_| self.read_handshake());
        match result {
            Ok((session_id, token)) => {
                tracing::info!(
                    session_id,
                    token_len = token.len(),
                    "Server session established"
                );
                self.session.establish(session_id, token);
                Ok(())
            }
            Err(e) => {
                self.mark_broken_on(&e);
                tracing::warn!(
                    opcode = Opcode::Connect.name(),
                    kind = %e.kind(),
                    "Handshake failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    fn read_handshake(&mut self) -> Result<(i32, Vec<u8>)> {
        let status = read_status(&mut self.transport)?;

        // The server echoes the new-session request value before assigning an id
        expect_session(&mut self.transport, NEW_SESSION)?;

        if status == Status::Error {
            let exceptions = read_exceptions(&mut self.transport)?;
            return Err(WireError::Server(exceptions.into()));
        }

        let session_id = read_int(&mut self.transport)?;
        if session_id == NO_SESSION || session_id == NEW_SESSION {
            return Err(WireError::Protocol(format!(
                "Server assigned reserved session id {}",
                session_id
            )));
        }
        let token = read_bytes(&mut self.transport)?;

        Ok((session_id, token))
    }

    // =========================================================================
    // Administrative Commands
    // =========================================================================

    /// Create a database on the server
    pub fn create_database(&mut self, name: &str, db_kind: &str, storage_kind: &str) -> Result<()> {
        self.ensure_usable()?;
        let session_id = self.session.require_session()?;
        let db_kind: DatabaseKind = db_kind.parse()?;
        let storage_kind: StorageKind = storage_kind.parse()?;

        let request = Request::new(Opcode::DbCreate, session_id)
            .string(name)
            .string(db_kind.as_str())
            .string(storage_kind.as_str());

        self.execute(&request, |_| Ok(()))
    }

    /// Drop a database on the server
    pub fn drop_database(&mut self, name: &str, db_kind: &str) -> Result<()> {
        self.ensure_usable()?;
        let session_id = self.session.require_session()?;
        let db_kind: DatabaseKind = db_kind.parse()?;

        let request = Request::new(Opcode::DbDrop, session_id)
            .string(name)
            .string(db_kind.as_str());

        self.execute(&request, |_| Ok(()))
    }

    /// Ask whether a database exists
    pub fn database_exists(&mut self, name: &str, storage_kind: &str) -> Result<bool> {
        self.ensure_usable()?;
        let session_id = self.session.require_session()?;
        let storage_kind: StorageKind = storage_kind.parse()?;

        let request = Request::new(Opcode::DbExist, session_id)
            .string(name)
            .string(storage_kind.as_str());

        self.execute(&request, |reader| read_bool(reader))
    }

    /// Fetch the server's database listing as raw bytes
    pub fn list_databases(&mut self) -> Result<DatabaseList> {
        self.ensure_usable()?;
        let session_id = self.session.require_session()?;
        let request = Request::new(Opcode::DbList, session_id);

        self.execute(&request, |reader| {
            Ok(DatabaseList(Bytes::from(read_bytes(reader)?)))
        })
    }

    // =========================================================================
    // Round Trip
    // =========================================================================

    /// Send `request`, validate the response header, then decode the payload
    fn execute<R, F>(&mut self, request: &Request, decode: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let result = self.send(request).and_then(|_| {
            read_response_header(&mut self.transport, request.session_id())?;
            decode(&mut self.transport)
        });

        if let Err(ref e) = result {
            self.mark_broken_on(e);
            tracing::warn!(
                opcode = request.opcode().name(),
                session_id = request.session_id(),
                kind = %e.kind(),
                "Command failed: {}",
                e
            );
        }
        result
    }

    fn ensure_usable(&self) -> Result<()> {
        match self.broken {
            Some(kind) => Err(WireError::ConnectionBroken(kind)),
            None => Ok(()),
        }
    }

    fn mark_broken_on(&mut self, error: &WireError) {
        if matches!(error.kind(), ErrorKind::Transport | ErrorKind::ProtocolViolation) {
            self.broken = Some(error.kind());
        }
    }

    /// Write one complete message
    fn send(&mut self, request: &Request) -> Result<()> {
        let message = request.encode()?;
        self.transport.write_all(&message)?;
        self.transport.flush()?;

        tracing::debug!(
            opcode = request.opcode().name(),
            session_id = request.session_id(),
            bytes = message.len(),
            "Request sent"
        );
        Ok(())
    }
}
