//! Normalizes raw wire records into typed messages.
//!
//! ```rust
//! use rchat::{ContentBlock, Message, parse_message};
//! use rtransport::RawRecord;
//!
//! let raw = RawRecord::assistant_text("gpt-5-codex", "42");
//! let Message::Assistant(message) = parse_message(&raw) else {
//!     panic!("assistant record must parse to an assistant message");
//! };
//! assert_eq!(message.content, vec![ContentBlock::text("42")]);
//! assert_eq!(parse_message(&raw), parse_message(&raw));
//! ```

use rtransport::{ContentSegment, RawRecord, RawResult, ToolResultPayload, UserPayload};
use serde_json::Value;

use crate::{
    AssistantMessage, ChatError, ContentBlock, Message, ResultMessage, SystemMessage, TextBlock,
    ThinkingBlock, ToolResultBlock, ToolResultContent, ToolUseBlock, UserContent, UserMessage,
};

/// Converts one raw record into exactly one message. Pure; never fails.
pub fn parse_message(raw: &RawRecord) -> Message {
    match raw {
        RawRecord::User {
            message,
            parent_tool_use_id,
        } => Message::User(UserMessage {
            content: match &message.content {
                UserPayload::Text(text) => UserContent::Text(text.clone()),
                UserPayload::Segments(segments) => {
                    UserContent::Blocks(segments.iter().map(parse_block).collect())
                }
            },
            parent_tool_use_id: parent_tool_use_id.clone(),
        }),
        RawRecord::Assistant {
            message,
            parent_tool_use_id,
        } => Message::Assistant(AssistantMessage {
            content: message.content.iter().map(parse_block).collect(),
            model: message.model.clone(),
            parent_tool_use_id: parent_tool_use_id.clone(),
        }),
        RawRecord::System { subtype, data } => Message::System(SystemMessage {
            subtype: subtype.clone(),
            data: data.clone(),
        }),
        RawRecord::Result(result) => Message::Result(parse_result(result)),
    }
}

/// Validates untyped JSON against the wire schema, then parses it.
///
/// Unknown `type` discriminants are rejected.
pub fn parse_value(value: &Value) -> Result<Message, ChatError> {
    let raw = RawRecord::from_value(value)?;
    Ok(parse_message(&raw))
}

fn parse_block(segment: &ContentSegment) -> ContentBlock {
    match segment {
        ContentSegment::Text { text } => ContentBlock::Text(TextBlock { text: text.clone() }),
        ContentSegment::Thinking {
            thinking,
            signature,
        } => ContentBlock::Thinking(ThinkingBlock {
            thinking: thinking.clone(),
            signature: signature.clone(),
        }),
        ContentSegment::ToolUse { id, name, input } => ContentBlock::ToolUse(ToolUseBlock {
            id: id.clone(),
            name: name.clone(),
            input: input.clone(),
        }),
        ContentSegment::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => ContentBlock::ToolResult(ToolResultBlock {
            tool_use_id: tool_use_id.clone(),
            content: content.as_ref().map(|payload| match payload {
                ToolResultPayload::Text(text) => ToolResultContent::Text(text.clone()),
                ToolResultPayload::Blocks(blocks) => ToolResultContent::Blocks(blocks.clone()),
            }),
            is_error: *is_error,
        }),
    }
}

fn parse_result(result: &RawResult) -> ResultMessage {
    ResultMessage {
        subtype: result.subtype.clone(),
        duration_ms: result.duration_ms,
        duration_api_ms: result.duration_api_ms,
        is_error: result.is_error,
        num_turns: result.num_turns,
        session_id: result.session_id.clone(),
        total_cost_usd: result.total_cost_usd,
        usage: result.usage,
        result: result.result.clone(),
    }
}
