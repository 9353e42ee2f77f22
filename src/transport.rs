//! TCP transport to the clamd daemon.

use std::io::{self, Read, Write};
use std::net::TcpStream;

use tracing::{debug, warn};

use crate::config::Config;
use crate::protocol::Transport;

/// One TCP connection to clamd, closed when dropped.
pub struct Stream {
    inner: TcpStream,
}

impl Stream {
    /// Connect to the daemon and apply the configured read timeout.
    ///
    /// A failure to set the timeout is logged and otherwise ignored; the
    /// scan then runs with the platform's default (unbounded) read
    /// behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn connect(config: &Config) -> io::Result<Self> {
        let inner = TcpStream::connect((config.host.as_str(), config.port))?;
        debug!(addr = %config.addr(), "connected to clamd");
        if let Err(e) = inner.set_read_timeout(config.read_timeout()) {
            warn!(%e, timeout_ms = config.timeout_ms, "could not set read timeout, reads are unbounded");
        }
        Ok(Self { inner })
    }
}

impl Transport for Stream {
    /// Non-blocking probe of the inbound side.
    ///
    /// `peek` in non-blocking mode distinguishes "nothing yet" from "reply
    /// waiting". A zero-byte peek means clamd hung up, which also ends the
    /// upload.
    fn reply_ready(&mut self) -> io::Result<bool> {
        self.inner.set_nonblocking(true)?;
        let mut probe = [0u8; 1];
        let probed = self.inner.peek(&mut probe);
        // Restore blocking mode before interpreting the probe.
        self.inner.set_nonblocking(false)?;
        match probed {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
