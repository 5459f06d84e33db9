//! Configuration for odbwire clients
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, WireError};
use crate::protocol::{
    DEFAULT_PROTOCOL_VERSION, DEFAULT_SERIALIZATION_FORMAT, DRIVER_NAME, DRIVER_VERSION,
};

/// Client-side connection configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub server_addr: String,

    /// Connection read timeout (milliseconds, 0 = block indefinitely)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block indefinitely)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Binary protocol version announced at handshake
    pub protocol_version: i16,

    /// Record serialization format identifier announced at handshake
    pub serialization_format: String,

    /// Driver name announced at handshake
    pub driver_name: String,

    /// Driver version announced at handshake
    pub driver_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:2424".to_string(),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            protocol_version: DEFAULT_PROTOCOL_VERSION,
            serialization_format: DEFAULT_SERIALIZATION_FORMAT.to_string(),
            driver_name: DRIVER_NAME.to_string(),
            driver_version: DRIVER_VERSION.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the server address
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the binary protocol version
    pub fn protocol_version(mut self, version: i16) -> Self {
        self.config.protocol_version = version;
        self
    }

    /// Set the serialization format identifier
    pub fn serialization_format(mut self, format: impl Into<String>) -> Self {
        self.config.serialization_format = format.into();
        self
    }

    pub fn driver_name(mut self, name: impl Into<String>) -> Self {
        self.config.driver_name = name.into();
        self
    }

    pub fn driver_version(mut self, version: impl Into<String>) -> Self {
        self.config.driver_version = version.into();
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let config = self.config;
        if config.server_addr.trim().is_empty() {
            return Err(WireError::Config("server address is empty".to_string()));
        }
        if config.serialization_format.is_empty() {
            return Err(WireError::Config(
                "serialization format is empty".to_string(),
            ));
        }
        if config.protocol_version <= 0 {
            return Err(WireError::Config(format!(
                "protocol version must be positive, got {}",
                config.protocol_version
            )));
        }
        Ok(config)
    }
}
