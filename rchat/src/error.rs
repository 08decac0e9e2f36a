//! Chat-layer errors and classification.

use rtransport::{TransportError, TransportErrorKind};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    Transport(TransportErrorKind),
    Parse,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid message record: {0}")]
    Parse(String),
}

impl ChatError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn kind(&self) -> ChatErrorKind {
        match self {
            Self::Transport(error) => ChatErrorKind::Transport(error.kind),
            Self::Parse(_) => ChatErrorKind::Parse,
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(value: serde_json::Error) -> Self {
        Self::parse(value.to_string())
    }
}
