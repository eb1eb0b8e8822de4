// boltcard/src/error.rs

use thiserror::Error;

use crate::file::FileSettingsEncodingError;
use crate::types::FileSpecifier;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The link to the tag failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// An exchange exceeded its deadline.
    #[error("operation timed out")]
    Timeout,

    /// A command does not fit a short APDU.
    #[error("apdu payload too long: limit {limit}, got {actual}")]
    FrameTooLong { limit: usize, actual: usize },

    /// A buffer has the wrong size.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A response or APDU is malformed.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// File settings could not be encoded.
    #[error(transparent)]
    Encoding(#[from] FileSettingsEncodingError),

    /// The tag answered with an unexpected status.
    #[error("unexpected status: ({status_major:#04x}, {status_minor:#04x})")]
    Status { status_major: u8, status_minor: u8 },

    /// The tag asked to retry authentication later (0xAD).
    #[error("tag requested an authentication retry (0xad); retry is not supported")]
    RetryUnsupported,

    /// Response MAC mismatch; the session is unusable.
    #[error("response MAC mismatch")]
    InvalidMac,

    /// The tag's RndA' does not match RndA.
    #[error("challenge response mismatch")]
    InvalidChallengeResponse,

    /// Cipher or padding failure.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// A template placeholder could not be located.
    #[error("template marker not found: {0}")]
    TemplateMarkerMissing(&'static str),

    /// Data exceeds the size of the target file.
    #[error("data too large for {file}: max {max}, got {actual}")]
    FileTooLarge {
        file: FileSpecifier,
        max: usize,
        actual: usize,
    },

    /// No key slot accepted the new key.
    #[error("no writable key slot available")]
    KeySlotsUnavailable,

    /// A workflow step failed.
    #[error("{step} failed: {source}")]
    Workflow {
        step: crate::workflow::Step,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Build a status error from the two status bytes of a response.
    pub fn status(status_major: u8, status_minor: u8) -> Self {
        Self::Status {
            status_major,
            status_minor,
        }
    }

    /// Whether the error leaves the authenticated session unusable. The
    /// caller must re-authenticate (on a fresh presentment) after these.
    pub fn is_session_fatal(&self) -> bool {
        match self {
            Self::Transport(_)
            | Self::Timeout
            | Self::InvalidMac
            | Self::InvalidChallengeResponse
            | Self::RetryUnsupported => true,
            Self::Workflow { source, .. } => source.is_session_fatal(),
            _ => false,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
