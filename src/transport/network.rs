//! # Network Transport
//!
//! Sends a finished command stream to a printer's raw printing port
//! (TCP 9100) over Ethernet/Wi-Fi.
//!
//! The transport knows nothing about the protocol: it connects, writes the
//! bytes in order and closes. Timeouts apply to connecting and to each write;
//! retries are up to the caller.
//!
//! ## Chunked Writes
//!
//! Large streams are written in chunks (4096 bytes by default) so that a
//! stalled printer trips the write timeout instead of blocking forever on one
//! huge write.

use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::TsprintError;

/// Raw printing port used by Star network interfaces
pub const DEFAULT_PORT: u16 = 9100;

/// Default connect and write timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// # Network Printer Transport
///
/// ## Example
///
/// ```no_run
/// use std::time::Duration;
/// use tsprint::transport::NetworkTransport;
///
/// let mut transport = NetworkTransport::connect("192.168.1.50", 9100, Duration::from_secs(5))?;
/// transport.write_all(&[0x1B, 0x2A, 0x72, 0x42])?;
///
/// # Ok::<(), tsprint::error::TsprintError>(())
/// ```
pub struct NetworkTransport {
    stream: TcpStream,
    peer: SocketAddr,
    chunk_size: usize,
}

impl NetworkTransport {
    /// Connect to `host:port`, trying each resolved address in turn.
    ///
    /// ## Errors
    ///
    /// Returns a transport error if the host does not resolve, or no address
    /// accepts a connection within `timeout`.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, TsprintError> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|e| TsprintError::Transport(format!("Could not resolve {}: {}", host, e)))?;

        let mut last_error = None;
        for addr in addrs {
            log::debug!("connecting to {}", addr);
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    stream.set_write_timeout(Some(timeout))?;
                    stream.set_nodelay(true)?;
                    log::info!("Connected to {}", addr);
                    return Ok(Self {
                        stream,
                        peer: addr,
                        chunk_size: CHUNK_SIZE,
                    });
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(TsprintError::Transport(match last_error {
            Some(e) if e.kind() == std::io::ErrorKind::TimedOut => format!(
                "Timed out while trying to connect to {}, make sure that the printer is online",
                host
            ),
            Some(e) => format!("Could not connect to {}: {}", host, e),
            None => format!("Could not resolve {}", host),
        }))
    }

    /// The address this transport is connected to.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Set the chunk size for large writes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Write all of `data`, in order, then flush.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), TsprintError> {
        for chunk in data.chunks(self.chunk_size) {
            self.stream
                .write_all(chunk)
                .map_err(|e| TsprintError::Transport(format!("Write failed: {}", e)))?;
        }

        self.stream
            .flush()
            .map_err(|e| TsprintError::Transport(format!("Flush failed: {}", e)))?;
        log::debug!("sent {} bytes to {}", data.len(), self.peer);

        Ok(())
    }

    /// Close the connection, letting the printer see end of stream.
    pub fn close(self) -> Result<(), TsprintError> {
        self.stream
            .shutdown(Shutdown::Both)
            .map_err(|e| TsprintError::Transport(format!("Shutdown failed: {}", e)))
    }
}

// ============================================================================
// TESTS
// ============================================================================
