//! Small convenience constructors for common types.

use crate::{
    ContentSegment, ConversationClient, HistoryEntry, Options, Role, SystemPrompt,
};

pub fn system_entry(text: impl Into<String>) -> HistoryEntry {
    HistoryEntry::text(Role::System, text)
}

pub fn user_entry(text: impl Into<String>) -> HistoryEntry {
    HistoryEntry::text(Role::User, text)
}

pub fn assistant_entry(text: impl Into<String>) -> HistoryEntry {
    HistoryEntry::assistant(vec![ContentSegment::text(text)])
}

/// The built-in preset with `append` as the effective system text.
pub fn preset_system_prompt(append: impl Into<String>) -> SystemPrompt {
    SystemPrompt::preset_with_append(append)
}

pub fn options_for_model(model: impl Into<String>) -> Options {
    Options::new().with_model(model)
}

pub fn conversation(model: impl Into<String>) -> ConversationClient {
    ConversationClient::new(options_for_model(model))
}
