//! Blocking scan sessions against clamd.

use std::io::Read;

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::protocol;
use crate::transport::Stream;
use crate::verdict::ScanVerdict;

/// Client for clamd's `INSTREAM` command.
///
/// Holds connection parameters only. Every [`scan`](Self::scan) opens its
/// own connection and is a single blocking operation, so one client can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct ClamClient {
    config: Config,
}

impl ClamClient {
    /// Client for the daemon at `host:port` with the given read timeout in
    /// milliseconds (`0` disables the timeout).
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, timeout_ms: u64) -> Self {
        Self::with_config(Config {
            host: host.into(),
            port,
            timeout_ms,
            ..Config::default()
        })
    }

    /// Client with full control over the configuration (chunk size).
    #[must_use]
    pub const fn with_config(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Scan an in-memory byte slice.
    ///
    /// # Errors
    ///
    /// Same as [`scan`](Self::scan).
    pub fn scan_bytes(&self, content: &[u8]) -> Result<ScanVerdict> {
        self.scan(&mut &content[..])
    }

    /// Stream `source` to clamd and classify its reply.
    ///
    /// The preferred form for anything large: content is forwarded in
    /// chunks of [`Config::chunk_size`] bytes and never buffered whole.
    /// The source is left open; only the connection is closed.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Connect`] if the daemon is unreachable and
    /// [`ScanError::Io`] if reading the source or talking to the daemon
    /// fails, including expiry of the read timeout. In-band daemon
    /// failures are not errors here; they surface as a verdict with
    /// [`Status::Error`](crate::verdict::Status::Error).
    pub fn scan<R: Read + ?Sized>(&self, source: &mut R) -> Result<ScanVerdict> {
        let addr = self.config.addr();
        let mut stream =
            Stream::connect(&self.config).map_err(|source| ScanError::Connect { addr, source })?;

        let end = protocol::stream_to_daemon(source, &mut stream, self.config.chunk_size)?;

        let raw = protocol::read_reply(&mut stream)?;
        debug!(reply = %raw, ?end, "clamd replied");
        Ok(ScanVerdict::from_reply(&raw))
        // `stream` drops here; the connection is closed on the error paths
        // above the same way.
    }
}
