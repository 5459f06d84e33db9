//! Shared Connection
//!
//! Lets several callers use one connection. The protocol is strictly
//! half-duplex, so each caller holds the lock for a whole round trip:
//! request written and response fully drained before the next begins.

use std::io::{Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::connection::{Connection, DatabaseList};
use crate::error::Result;

/// Cloneable handle to a mutex-guarded [`Connection`]
pub struct SharedConnection<T> {
    inner: Arc<Mutex<Connection<T>>>,
}

impl<T> Clone for SharedConnection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Read + Write> SharedConnection<T> {
    pub fn new(connection: Connection<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(connection)),
        }
    }

    /// Run `f` with exclusive access to the connection
    pub fn with<R>(&self, f: impl FnOnce(&mut Connection<T>) -> R) -> R {
        let mut conn = self.inner.lock();
        f(&mut conn)
    }

    pub fn session_id(&self) -> i32 {
        self.inner.lock().session().session_id()
    }

    pub fn open_server_session(&self, user: &str, password: &str) -> Result<()> {
        self.with(|conn| conn.open_server_session(user, password))
    }

    pub fn create_database(&self, name: &str, db_kind: &str, storage_kind: &str) -> Result<()> {
        self.with(|conn| conn.create_database(name, db_kind, storage_kind))
    }

    pub fn drop_database(&self, name: &str, db_kind: &str) -> Result<()> {
        self.with(|conn| conn.drop_database(name, db_kind))
    }

    pub fn database_exists(&self, name: &str, storage_kind: &str) -> Result<bool> {
        self.with(|conn| conn.database_exists(name, storage_kind))
    }

    pub fn list_databases(&self) -> Result<DatabaseList> {
        self.with(|conn| conn.list_databases())
    }
}
