//! Shared transport error kinds and error value helpers.
//!
//! ```rust
//! use rtransport::{TransportError, TransportErrorKind};
//!
//! let missing = TransportError::configuration("no API key");
//! assert_eq!(missing.kind, TransportErrorKind::Configuration);
//! assert!(!missing.retryable);
//!
//! let timeout = TransportError::timeout("backend timed out");
//! assert!(timeout.retryable);
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Caller-supplied values were rejected before any I/O.
    InvalidInput,
    /// Credentials or backend could not be resolved.
    Configuration,
    /// The backend answered but carried no recognizable text.
    Extraction,
    /// The requested capability does not exist on this transport.
    Unsupported,
    Authentication,
    RateLimited,
    Timeout,
    Transport,
    Unavailable,
    Other,
}

/// Error surfaced by a transport or backend.
///
/// `retryable` classifies the failure for callers; nothing in this crate
/// retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidInput, message, false)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Configuration, message, false)
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Extraction, message, false)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Unsupported, message, false)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Authentication, message, false)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::RateLimited, message, true)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message, true)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Transport, message, true)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Unavailable, message, true)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message, false)
    }
}
