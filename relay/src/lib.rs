//! Unified facade over the relay workspace crates.
//!
//! This crate is the single dependency for most applications. It re-exports
//! the transport, message and conversation layers and adds convenience
//! helpers, history macros and tracing setup.
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use relay::prelude::*;
//!
//! # async fn run() -> Result<(), ChatError> {
//! let mut messages = query("What is 6 x 7?", options_for_model("gpt-5-codex"));
//! while let Some(message) = messages.next().await {
//!     if let Message::Assistant(reply) = message? {
//!         println!("{}", reply.text());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod macros;

pub mod observe;
pub mod prelude;
pub mod util;

pub use rchat;
pub use rcommon;
pub use rtransport;

pub use rchat::{
    AssistantMessage, ChatError, ChatErrorKind, ContentBlock, ConversationClient, Message,
    MessageStream, ResultMessage, SystemMessage, TextBlock, ThinkingBlock, ToolResultBlock,
    ToolResultContent, ToolUseBlock, UserContent, UserMessage, parse_message, parse_value, query,
    query_with_transport,
};
pub use rcommon::{BoxFuture, HeaderMap, SessionId};
pub use rtransport::{
    ContentSegment, EnvironmentSource, HistoryEntry, Options, ProcessEnvironment, PromptPreset,
    RawRecord, RawResult, RecordStream, ResponseFormat, ResponsesBackend, ResponsesRequest,
    ResponsesResponse, ResponsesTransport, Role, SecretString, StaticEnvironment, SystemPrompt,
    Transport, TransportError, TransportErrorKind, Usage,
};

pub use observe::{InitError, env_filter, init_tracing};
pub use util::{
    assistant_entry, conversation, options_for_model, preset_system_prompt, system_entry,
    user_entry,
};

#[cfg(test)]
mod tests {
    use crate::Role;

    #[test]
    fn relay_entry_macro_creates_expected_entry() {
        let entry = crate::relay_entry!(user => "hello");
        assert_eq!(entry.role, Role::User);
        assert_eq!(entry.content[0].as_text(), Some("hello"));
    }

    #[test]
    fn relay_history_macro_builds_entry_vector() {
        let history = crate::relay_history![
            system => "You are concise.",
            user => "Summarize the repo",
        ];

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::System);
        assert_eq!(history[1].role, Role::User);
    }

    #[test]
    fn empty_history_macro_is_empty() {
        let history = crate::relay_history![];
        assert!(history.is_empty());
    }
}
