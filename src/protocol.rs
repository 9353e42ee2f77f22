//! Wire protocol for clamd's `INSTREAM` command.
//!
//! Upload format:
//! - Header: `zINSTREAM\0`, once per connection.
//! - Chunk frame: `[4B length BE][payload...]`.
//! - Terminator: `[4B zero]`, no payload.
//!
//! The reply is a single NUL-terminated text line.

use std::io::{self, Read, Write};

use bytes::BufMut;
use tracing::{debug, trace};

/// Command header instructing clamd to expect a framed streaming upload.
pub const INSTREAM_COMMAND: &[u8] = b"zINSTREAM\0";

/// Upper bound on the reply bytes this client will buffer.
const MAX_REPLY_LEN: usize = 4096;

/// Connection seam used by the encoder: byte I/O plus a non-blocking probe
/// of the inbound side.
pub trait Transport: Read + Write {
    /// True if the daemon has already sent reply bytes (or hung up).
    ///
    /// # Errors
    ///
    /// Returns an error if the probe itself fails.
    fn reply_ready(&mut self) -> io::Result<bool>;
}

/// How an upload ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The source was drained and every chunk was sent.
    Completed,
    /// clamd replied (or hung up) before the source was drained; the
    /// remaining chunks were not sent.
    Interrupted,
}

// ─── Upload ─────────────────────────────────────────────────────────────────

/// Stream `source` to the daemon as length-prefixed chunks.
///
/// Writes the command header, then one frame per chunk with a flush after
/// each so clamd scans incrementally, then the zero-length terminator.
/// clamd enforces a maximum stream size and reports it in-band before the
/// upload finishes, so the inbound side is probed before every chunk write;
/// once a reply is waiting, no further chunks are sent.
///
/// The transport stays open; closing it is the caller's job, and the
/// caller's source is never closed here either.
///
/// # Errors
///
/// Returns an error if reading the source or writing the transport fails.
pub fn stream_to_daemon<R, T>(
    source: &mut R,
    transport: &mut T,
    chunk_size: usize,
) -> io::Result<StreamEnd>
where
    R: Read + ?Sized,
    T: Transport + ?Sized,
{
    transport.write_all(INSTREAM_COMMAND)?;

    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut frame = Vec::with_capacity(4 + chunk.len());
    let mut sent = 0usize;
    let mut end = StreamEnd::Completed;

    loop {
        let read = source.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        if transport.reply_ready()? {
            debug!(bytes_sent = sent, "reply arrived mid-upload, stopping");
            end = StreamEnd::Interrupted;
            break;
        }

        let len = u32::try_from(read)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "chunk exceeds frame limit"))?;
        frame.clear();
        frame.put_u32(len);
        frame.put_slice(&chunk[..read]);
        transport.write_all(&frame)?;
        transport.flush()?;
        sent += read;
        trace!(chunk_len = read, "chunk sent");
    }

    transport.write_all(&0u32.to_be_bytes())?;
    transport.flush()?;
    debug!(bytes_sent = sent, ?end, "upload finished");
    Ok(end)
}

// ─── Reply ──────────────────────────────────────────────────────────────────

/// Read clamd's reply and trim it.
///
/// Reads until the daemon closes the connection, the NUL terminating a
/// z-style reply arrives, or [`MAX_REPLY_LEN`] bytes have been buffered.
/// Replies are one short line, so the loop normally ends on the first
/// read; the cap bounds memory against a misbehaving peer.
///
/// Returns the empty string if the daemon sent nothing.
///
/// # Errors
///
/// Returns an error if a read fails, including expiry of the configured
/// read timeout.
pub fn read_reply<R>(r: &mut R) -> io::Result<String>
where
    R: Read + ?Sized,
{
    let mut raw = Vec::new();
    let mut buf = [0u8; 512];

    loop {
        let read = r.read(&mut buf)?;
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..read]);
        if buf[..read].contains(&0) || raw.len() >= MAX_REPLY_LEN {
            break;
        }
    }

    let text = String::from_utf8_lossy(&raw);
    Ok(text
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string())
}
