//! Error types for odbwire
//!
//! Provides a unified error type for all operations, plus a coarse
//! classification so callers can decide whether to retry, reconnect, or abort.

use std::fmt;

use thiserror::Error;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for odbwire operations
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Violations
    // -------------------------------------------------------------------------
    #[error("Session mismatch: sent {expected}, server echoed {actual}")]
    SessionMismatch { expected: i32, actual: i32 },

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Precondition Errors
    // -------------------------------------------------------------------------
    #[error("Session not initialized: open a server session first")]
    SessionNotInitialized,

    #[error("Session already established (id {0})")]
    SessionAlreadyEstablished(i32),

    #[error("Invalid storage kind: {0:?}")]
    InvalidStorageKind(String),

    #[error("Invalid database kind: {0:?}")]
    InvalidDatabaseKind(String),

    #[error("Field too large to encode: {len} bytes (max {max})")]
    FieldTooLarge { len: usize, max: usize },

    #[error("Connection broken by an earlier {0} error; reconnect")]
    ConnectionBroken(ErrorKind),

    // -------------------------------------------------------------------------
    // Server-Reported Exceptions
    // -------------------------------------------------------------------------
    #[error("Server error(s): {0}")]
    Server(ServerErrors),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Which family an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Read/write on the underlying stream failed
    Transport,

    /// The stream is desynchronized; the connection should be dropped
    ProtocolViolation,

    /// Rejected locally before any bytes were sent
    Precondition,

    /// The server answered with an ERROR status
    Server,

    /// Invalid client configuration
    Config,
}

impl WireError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WireError::Io(_) => ErrorKind::Transport,
            WireError::SessionMismatch { .. } | WireError::Protocol(_) => {
                ErrorKind::ProtocolViolation
            }
            WireError::SessionNotInitialized
            | WireError::SessionAlreadyEstablished(_)
            | WireError::InvalidStorageKind(_)
            | WireError::InvalidDatabaseKind(_)
            | WireError::FieldTooLarge { .. } => ErrorKind::Precondition,
            WireError::ConnectionBroken(kind) => *kind,
            WireError::Server(_) => ErrorKind::Server,
            WireError::Config(_) => ErrorKind::Config,
        }
    }

    /// Whether the connection can still be used after this error
    ///
    /// Transport errors and protocol violations leave the stream misaligned;
    /// a [`Connection`](crate::network::Connection) refuses further commands
    /// after either.
    pub fn is_connection_usable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Precondition | ErrorKind::Server | ErrorKind::Config
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::ProtocolViolation => "protocol violation",
            ErrorKind::Precondition => "precondition",
            ErrorKind::Server => "server",
            ErrorKind::Config => "config",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Server Exceptions
// =============================================================================

/// One exception descriptor reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerException {
    /// Fully qualified exception class name on the server
    pub class_name: String,

    /// Exception message (the server may send null)
    pub message: Option<String>,
}

impl fmt::Display for ServerException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.class_name, message),
            None => f.write_str(&self.class_name),
        }
    }
}

/// Ordered list of exceptions from a single ERROR response
///
/// Servers report chained causes, so every entry is kept in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrors(pub Vec<ServerException>);

impl ServerErrors {
    pub fn exceptions(&self) -> &[ServerException] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The outermost exception, if any
    pub fn first(&self) -> Option<&ServerException> {
        self.0.first()
    }
}

impl fmt::Display for ServerErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<no exception details>");
        }
        for (i, exception) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; caused by ")?;
            }
            write!(f, "{}", exception)?;
        }
        Ok(())
    }
}

impl From<Vec<ServerException>> for ServerErrors {
    fn from(exceptions: Vec<ServerException>) -> Self {
        ServerErrors(exceptions)
    }
}

impl From<ServerErrors> for WireError {
    fn from(errors: ServerErrors) -> Self {
        WireError::Server(errors)
    }
}
