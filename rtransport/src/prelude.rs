//! Common `rtransport` imports for downstream crates.

pub use crate::{
    ContentSegment, HistoryEntry, Options, RawRecord, RecordStream, ResponseFormat,
    ResponsesBackend, ResponsesRequest, ResponsesResponse, ResponsesTransport, Role, SystemPrompt,
    Transport, TransportError, TransportErrorKind,
};
pub use rcommon::{BoxFuture, HeaderMap, SessionId};
