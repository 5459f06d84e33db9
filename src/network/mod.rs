//! Network Module
//!
//! Client connections to the database server.
//!
//! ## Architecture
//! - One transport per connection, one request in flight at a time
//! - Session State owned by the connection
//! - `SharedConnection` serializes callers that share a connection

mod transport;
mod connection;
mod shared;

pub use transport::TcpTransport;
pub use connection::{Connection, DatabaseList};
pub use shared::SharedConnection;
