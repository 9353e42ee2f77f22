//! Scan verdicts and clamd reply classification.
//!
//! clamd's reply grammar for a streamed scan is a small closed set: one
//! literal success line, one parametrized detection line, and a couple of
//! literal fatal-condition lines. Exact-match plus prefix/suffix tests cover
//! all of it; no parser needed.

use serde::Serialize;

/// Reply for a clean stream.
pub const RESPONSE_OK: &str = "stream: OK";

/// Prefix clamd puts on every `INSTREAM` reply line.
pub const STREAM_PREFIX: &str = "stream: ";

/// Suffix marking a detection line.
pub const FOUND_SUFFIX: &str = "FOUND";

/// Fatal reply when the upload exceeds clamd's `StreamMaxLength`.
pub const RESPONSE_SIZE_EXCEEDED: &str = "INSTREAM size limit exceeded. ERROR";

/// Fatal reply when clamd cannot spool the stream to disk.
pub const RESPONSE_ERROR_WRITING_FILE: &str = "Error writing to temporary file. ERROR";

/// Outcome class of one scan.
///
/// `Failed` is the default: classification only ever promotes it to
/// `Passed` or `Error`, it never confirms a failure explicitly. A detection
/// is a `Failed` verdict with a signature attached, not a separate variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Status {
    /// clamd reported the stream clean.
    Passed,
    /// Not clean: a detection, an empty reply, or unrecognized reply text.
    #[default]
    Failed,
    /// clamd reported an in-band fatal condition.
    Error,
}

/// Result of one streamed scan.
///
/// Immutable once built; `status` and `signature` are fully determined by
/// the reply text through [`ScanVerdict::from_reply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanVerdict {
    raw_reply: String,
    status: Status,
    signature: Option<String>,
}

impl ScanVerdict {
    /// Classify a trimmed clamd reply into a verdict.
    ///
    /// Precedence: the literal OK line, then detection lines (suffix
    /// `FOUND`), then the known fatal lines. Anything else is a generic
    /// `Failed` — an unrecognized reply is resolved toward "not clean",
    /// never a parse error.
    #[must_use]
    pub fn from_reply(raw: &str) -> Self {
        let mut status = Status::default();
        let mut signature = None;

        if raw == RESPONSE_OK {
            status = Status::Passed;
        } else if let Some(line) = raw.strip_suffix(FOUND_SUFFIX) {
            // "stream: Eicar-Test-Signature FOUND" — the signature sits
            // between the fixed prefix and the space before FOUND. A line
            // missing the prefix still yields the stripped remainder.
            let sig = line.strip_prefix(STREAM_PREFIX).unwrap_or(line).trim();
            signature = Some(sig.to_string());
        } else if raw == RESPONSE_SIZE_EXCEEDED || raw == RESPONSE_ERROR_WRITING_FILE {
            status = Status::Error;
        }

        Self {
            raw_reply: raw.to_string(),
            status,
            signature,
        }
    }

    /// The exact trimmed reply text from clamd.
    #[must_use]
    pub fn raw_reply(&self) -> &str {
        &self.raw_reply
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Detected threat name, present only for detection replies.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        matches!(self.status, Status::Passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_reply_passes() {
        let verdict = ScanVerdict::from_reply("stream: OK");
        assert_eq!(verdict.status(), Status::Passed);
        assert!(verdict.is_clean());
        assert_eq!(verdict.signature(), None);
        assert_eq!(verdict.raw_reply(), "stream: OK");
    }

    #[test]
    fn detection_extracts_signature() {
        let verdict = ScanVerdict::from_reply("stream: Eicar-Test-Signature FOUND");
        assert_eq!(verdict.status(), Status::Failed);
        assert_eq!(verdict.signature(), Some("Eicar-Test-Signature"));
    }

    #[test]
    fn size_limit_reply_is_error() {
        let verdict = ScanVerdict::from_reply("INSTREAM size limit exceeded. ERROR");
        assert_eq!(verdict.status(), Status::Error);
        assert_eq!(verdict.signature(), None);
    }

    #[test]
    fn temp_file_reply_is_error() {
        let verdict = ScanVerdict::from_reply("Error writing to temporary file. ERROR");
        assert_eq!(verdict.status(), Status::Error);
        assert_eq!(verdict.signature(), None);
    }

    #[test]
    fn unrecognized_reply_fails_silently() {
        let verdict = ScanVerdict::from_reply("garbage");
        assert_eq!(verdict.status(), Status::Failed);
        assert_eq!(verdict.signature(), None);
        assert_eq!(verdict.raw_reply(), "garbage");
    }

    #[test]
    fn empty_reply_fails() {
        let verdict = ScanVerdict::from_reply("");
        assert_eq!(verdict.status(), Status::Failed);
        assert_eq!(verdict.signature(), None);
    }

    #[test]
    fn detection_without_prefix_does_not_panic() {
        let verdict = ScanVerdict::from_reply("Win.Test.EICAR_HDB-1 FOUND");
        assert_eq!(verdict.status(), Status::Failed);
        assert_eq!(verdict.signature(), Some("Win.Test.EICAR_HDB-1"));
    }

    #[test]
    fn ok_line_with_trailing_noise_is_not_clean() {
        let verdict = ScanVerdict::from_reply("stream: OK maybe");
        assert_eq!(verdict.status(), Status::Failed);
    }
}
