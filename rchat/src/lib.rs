//! Typed messages over the transport layer: parser, one-shot queries and a
//! stateful conversation client.
//!
//! ```rust
//! use rchat::{ConversationClient, Options};
//!
//! let client = ConversationClient::new(Options::new().with_model("gpt-5-codex"));
//! assert!(client.history().is_empty());
//! assert!(client.last_response().is_empty());
//! ```

mod client;
mod error;
mod message;
mod parser;
mod query;

pub mod prelude {
    pub use crate::{
        AssistantMessage, ChatError, ChatErrorKind, ContentBlock, ConversationClient, Message,
        MessageStream, ResultMessage, parse_message, query, query_with_transport,
    };
    pub use rtransport::{HistoryEntry, Options, SystemPrompt, Transport, TransportError};
}

pub use client::ConversationClient;
pub use error::{ChatError, ChatErrorKind};
pub use message::{
    AssistantMessage, ContentBlock, Message, ResultMessage, SystemMessage, TextBlock,
    ThinkingBlock, ToolResultBlock, ToolResultContent, ToolUseBlock, UserContent, UserMessage,
};
pub use parser::{parse_message, parse_value};
pub use query::{MessageStream, query, query_with_transport};
pub use rcommon::SessionId;
pub use rtransport::{Options, Transport};
