//! Enumerated argument domains
//!
//! The server accepts a closed set of storage and database kinds. Anything
//! else is rejected locally before a request is encoded.

use std::fmt;
use std::str::FromStr;

use crate::error::WireError;

/// Where the server keeps a database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// On-disk storage ("plocal")
    Persistent,

    /// In-memory storage ("memory")
    Volatile,
}

impl StorageKind {
    /// Token sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Persistent => "plocal",
            StorageKind::Volatile => "memory",
        }
    }
}

impl FromStr for StorageKind {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plocal" | "persistent" => Ok(StorageKind::Persistent),
            "memory" | "volatile" => Ok(StorageKind::Volatile),
            _ => Err(WireError::InvalidStorageKind(s.to_string())),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data model of a database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Document,
    Graph,
}

impl DatabaseKind {
    /// Token sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Document => "document",
            DatabaseKind::Graph => "graph",
        }
    }
}

impl FromStr for DatabaseKind {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(DatabaseKind::Document),
            "graph" => Ok(DatabaseKind::Graph),
            _ => Err(WireError::InvalidDatabaseKind(s.to_string())),
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
