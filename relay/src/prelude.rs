//! Common imports for most relay applications.

pub use crate::{
    assistant_entry, conversation, init_tracing, options_for_model, preset_system_prompt,
    system_entry, user_entry,
};
pub use crate::{relay_entry, relay_history};
pub use crate::{
    AssistantMessage, BoxFuture, ChatError, ChatErrorKind, ContentBlock, ConversationClient,
    HistoryEntry, Message, MessageStream, Options, RawRecord, ResponseFormat, ResponsesBackend,
    ResponsesTransport, ResultMessage, Role, SessionId, SystemPrompt, Transport, TransportError,
    TransportErrorKind, parse_message, query, query_with_transport,
};
