//! Wire schema shared by transports and the message parser.
//!
//! Records are a closed tagged union keyed on `type`; untyped JSON is
//! validated into it with [`RawRecord::from_value`].
//!
//! ```rust
//! use rtransport::RawRecord;
//! use serde_json::json;
//!
//! let record = RawRecord::from_value(&json!({
//!     "type": "assistant",
//!     "message": {
//!         "role": "assistant",
//!         "model": "gpt-5-codex",
//!         "content": [{"type": "text", "text": "42"}]
//!     }
//! }))
//! .expect("record should validate");
//!
//! assert_eq!(record.record_type(), "assistant");
//! assert!(RawRecord::from_value(&json!({"type": "stream_event"})).is_err());
//! ```

use rcommon::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSegment {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
        signature: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<ToolResultPayload>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

impl ContentSegment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResultPayload {
    Text(String),
    Blocks(Vec<Value>),
}

/// One conversational turn as replayed to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: Vec<ContentSegment>,
}

impl HistoryEntry {
    pub fn new(role: Role, content: Vec<ContentSegment>) -> Self {
        Self { role, content }
    }

    /// Wraps plain text as a single text segment.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self::new(role, vec![ContentSegment::text(text)])
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(Role::User, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::text(Role::System, text)
    }

    pub fn assistant(content: Vec<ContentSegment>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl Usage {
    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none() && self.output_tokens.is_none() && self.total_tokens.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserPayload {
    Text(String),
    Segments(Vec<ContentSegment>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUserMessage {
    pub role: Role,
    pub content: UserPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAssistantMessage {
    pub role: Role,
    pub model: String,
    pub content: Vec<ContentSegment>,
}

/// Terminal accounting record for one generation.
///
/// Optional fields serialize as `null` so the record keeps a fixed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub subtype: String,
    pub duration_ms: u64,
    pub duration_api_ms: u64,
    pub is_error: bool,
    pub num_turns: u32,
    pub session_id: SessionId,
    #[serde(default)]
    pub total_cost_usd: Option<f64>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub result: Option<String>,
}

impl RawResult {
    pub fn success(
        duration_ms: u64,
        session_id: SessionId,
        result: impl Into<String>,
        usage: Option<Usage>,
    ) -> Self {
        Self {
            subtype: "success".to_string(),
            duration_ms,
            duration_api_ms: duration_ms,
            is_error: false,
            num_turns: 1,
            session_id,
            total_cost_usd: None,
            usage,
            result: Some(result.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawRecord {
    User {
        message: RawUserMessage,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_tool_use_id: Option<String>,
    },
    Assistant {
        message: RawAssistantMessage,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_tool_use_id: Option<String>,
    },
    System {
        subtype: String,
        #[serde(flatten)]
        data: Map<String, Value>,
    },
    Result(RawResult),
}

impl RawRecord {
    /// Assistant record carrying a single text segment.
    pub fn assistant_text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Assistant {
            message: RawAssistantMessage {
                role: Role::Assistant,
                model: model.into(),
                content: vec![ContentSegment::text(text)],
            },
            parent_tool_use_id: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn record_type(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Assistant { .. } => "assistant",
            Self::System { .. } => "system",
            Self::Result(_) => "result",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn assistant_record_serializes_to_expected_wire_shape() {
        let record = RawRecord::assistant_text("gpt-5-codex", "Hi there");
        let value = record.to_value().expect("serialize");

        assert_eq!(
            value,
            json!({
                "type": "assistant",
                "message": {
                    "role": "assistant",
                    "model": "gpt-5-codex",
                    "content": [{"type": "text", "text": "Hi there"}]
                }
            })
        );
    }

    #[test]
    fn result_record_keeps_null_fields_in_wire_shape() {
        let record = RawRecord::Result(RawResult::success(
            12,
            SessionId::new("s-1"),
            "42",
            None,
        ));
        let value = record.to_value().expect("serialize");

        assert_eq!(
            value,
            json!({
                "type": "result",
                "subtype": "success",
                "duration_ms": 12,
                "duration_api_ms": 12,
                "is_error": false,
                "num_turns": 1,
                "session_id": "s-1",
                "total_cost_usd": null,
                "usage": null,
                "result": "42"
            })
        );
    }

    #[test]
    fn system_record_collects_extra_fields_as_data() {
        let record = RawRecord::from_value(&json!({
            "type": "system",
            "subtype": "init",
            "cwd": "/tmp",
            "tools": ["Read"]
        }))
        .expect("system record should validate");

        match record {
            RawRecord::System { subtype, data } => {
                assert_eq!(subtype, "init");
                assert_eq!(data.get("cwd"), Some(&json!("/tmp")));
                assert!(!data.contains_key("type"));
            }
            other => panic!("unexpected record: {other:?}"),
        }
    }

    #[test]
    fn user_record_accepts_plain_string_or_segments() {
        let plain = RawRecord::from_value(&json!({
            "type": "user",
            "message": {"role": "user", "content": "hello"}
        }))
        .expect("plain user record");
        assert!(matches!(
            plain,
            RawRecord::User { message: RawUserMessage { content: UserPayload::Text(_), .. }, .. }
        ));

        let segmented = RawRecord::from_value(&json!({
            "type": "user",
            "message": {
                "role": "user",
                "content": [{"type": "tool_result", "tool_use_id": "t1", "content": "ok"}]
            }
        }))
        .expect("segmented user record");
        assert!(matches!(
            segmented,
            RawRecord::User { message: RawUserMessage { content: UserPayload::Segments(_), .. }, .. }
        ));
    }

    #[test]
    fn unknown_segment_type_is_rejected() {
        let result = RawRecord::from_value(&json!({
            "type": "assistant",
            "message": {
                "role": "assistant",
                "model": "m",
                "content": [{"type": "image", "url": "x"}]
            }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn history_entry_text_wraps_single_segment() {
        let entry = HistoryEntry::user("A");
        assert_eq!(entry.role, Role::User);
        assert_eq!(entry.content, vec![ContentSegment::text("A")]);
        assert_eq!(
            serde_json::to_value(&entry).expect("serialize"),
            json!({"role": "user", "content": [{"type": "text", "text": "A"}]})
        );
    }
}
