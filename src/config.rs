//! Client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Default clamd TCP port.
pub const DEFAULT_PORT: u16 = 3310;

/// Default chunk size for the streaming upload, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connection parameters for a [`ClamClient`](crate::ClamClient).
///
/// Set once at construction and never mutated afterward; every scan opens
/// its own connection, so one client is safe to share across threads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hostname or IP address of the clamd daemon.
    pub host: String,
    /// TCP port clamd listens on.
    pub port: u16,
    /// Read timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,
    /// Maximum payload bytes per chunk frame.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// `host:port` form used for connecting and in error messages.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Read timeout as a [`Duration`], `None` when unbounded.
    #[must_use]
    pub const fn read_timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.timeout_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_clamd_conventions() {
        let config = Config::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3310);
        assert_eq!(config.chunk_size, 2048);
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let config = Config {
            timeout_ms: 0,
            ..Config::default()
        };
        assert!(config.read_timeout().is_none());
    }

    #[test]
    fn timeout_converts_to_duration() {
        let config = Config {
            timeout_ms: 1500,
            ..Config::default()
        };
        assert_eq!(config.read_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn deserializes_partial_toml() {
        let config: Config = toml::from_str("host = \"av.internal\"\nport = 3311").unwrap();
        assert_eq!(config.host, "av.internal");
        assert_eq!(config.port, 3311);
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.chunk_size, 2048);
    }
}
