//! # odbwire
//!
//! Client-side core of a binary protocol for administering a remote
//! database server:
//! - Session handshake with administrator credentials
//! - Session-scoped administrative commands (create/drop/exists/list)
//! - Server exception decoding and error classification
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               Connection / SharedConnection                  │
//! │        (handshake, admin commands, Session State)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────────┐
//!   │   Request   │          │ Response header │
//!   │  (encode)   │          │ + Error Decoder │
//!   └──────┬──────┘          └────────┬────────┘
//!          │                          │
//!          ▼                          ▼
//!   ┌─────────────────────────────────────────┐
//!   │     Wire primitives over Read + Write   │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use odbwire::{ClientConfig, Connection};
//!
//! # fn main() -> odbwire::Result<()> {
//! let config = ClientConfig::builder().server_addr("127.0.0.1:2424").build()?;
//! let mut conn = Connection::connect(&config)?;
//! conn.open_server_session("root", "secret")?;
//! if !conn.database_exists("cars", "plocal")? {
//!     conn.create_database("cars", "document", "plocal")?;
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod session;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, Result, ServerErrors, ServerException, WireError};
pub use config::ClientConfig;
pub use session::SessionState;
pub use network::{Connection, DatabaseList, SharedConnection, TcpTransport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of odbwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
