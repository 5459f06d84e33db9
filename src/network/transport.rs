//! TCP Transport
//!
//! Buffered duplex stream over a single TCP connection.

use std::io::{self, BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;

/// Buffered TCP stream to the database server
pub struct TcpTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect to `config.server_addr` and apply the configured timeouts
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let stream = TcpStream::connect(config.server_addr.as_str())?;
        let mut transport = Self::from_stream(stream)?;
        transport.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;
        Ok(transport)
    }

    /// Wrap an already-connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm: every request is one small write
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure socket timeouts (0 = block indefinitely)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_timeout = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        let write_timeout = (write_ms > 0).then(|| Duration::from_millis(write_ms));

        self.reader.get_ref().set_read_timeout(read_timeout)?;
        self.writer.get_ref().set_write_timeout(write_timeout)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Read for TcpTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for TcpTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
