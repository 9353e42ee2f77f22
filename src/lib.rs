//! Streaming client for the clamd antivirus daemon.
//!
//! Implements the `INSTREAM` command: content is uploaded over TCP as
//! length-prefixed chunks and clamd's one-line reply is classified into a
//! [`ScanVerdict`] — clean, a detection with its signature name, or an
//! in-band daemon error.
//!
//! ```no_run
//! use clamstream::ClamClient;
//!
//! # fn main() -> clamstream::Result<()> {
//! let client = ClamClient::new("localhost", 3310, 30_000);
//! let verdict = client.scan_bytes(b"content to scan")?;
//! if !verdict.is_clean() {
//!     println!("blocked: {:?}", verdict.signature());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod verdict;

pub use client::ClamClient;
pub use config::Config;
pub use error::{Result, ScanError};
pub use verdict::{ScanVerdict, Status};
