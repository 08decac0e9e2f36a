//! Transport layer: turns a prompt and prior history into raw wire records.
//!
//! The [`Transport`] trait is the seam between callers and the remote
//! generation backend. [`ResponsesTransport`] is the default implementation;
//! it assembles a [`ResponsesRequest`] from [`Options`], performs exactly one
//! backend call, and yields an `assistant` record followed by a `result`
//! record.
//!
//! ```rust
//! use rtransport::{HistoryEntry, Options, ResponsesTransport, SystemPrompt};
//!
//! let transport = ResponsesTransport::new(
//!     Options::new()
//!         .with_model("gpt-5")
//!         .with_system_prompt(SystemPrompt::preset_with_append("X")),
//! );
//!
//! let request = transport.build_request("hello", Some(&[HistoryEntry::user("earlier")][..]));
//! assert_eq!(request.input.len(), 3);
//! assert_eq!(request.input[1], HistoryEntry::system("X"));
//! ```

pub mod backend;
pub mod credentials;
pub mod error;
#[cfg(feature = "backend-http")]
pub mod http;
pub mod options;
pub mod prelude;
pub mod transport;
pub mod wire;

pub use backend::{
    ResponseContentPart, ResponseOutputItem, ResponseUsage, ResponsesBackend, ResponsesRequest,
    ResponsesResponse, TextSource,
};
pub use credentials::{
    API_KEY_ENV_VAR, EnvironmentSource, ProcessEnvironment, ResolvedCredentials, SecretString,
    StaticEnvironment, resolve_credentials,
};
pub use error::{TransportError, TransportErrorKind};
#[cfg(feature = "backend-http")]
pub use http::ResponsesHttpBackend;
pub use options::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT, Options, PromptPreset, ResponseFormat,
    SystemPrompt,
};
pub use rcommon::{BoxFuture, HeaderMap, SessionId};
pub use transport::{PromptStream, RecordStream, ResponsesTransport, Transport};
pub use wire::{
    ContentSegment, HistoryEntry, RawAssistantMessage, RawRecord, RawResult, RawUserMessage, Role,
    ToolResultPayload, Usage, UserPayload,
};
