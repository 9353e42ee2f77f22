use std::io;

/// Errors a scan attempt can surface.
///
/// In-band daemon failures (stream size limit, temp-file write failure) are
/// not errors at this level; they come back as a normal verdict with
/// [`Status::Error`](crate::verdict::Status::Error).
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to connect to clamd at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("clamd IO: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
