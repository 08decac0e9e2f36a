//! Backend boundary: the "create response" capability a transport delegates to.
//!
//! ```rust
//! use rtransport::{ResponsesResponse, TextSource};
//!
//! let response = ResponsesResponse::from_text("hello");
//! assert!(matches!(response.text_source(), TextSource::Direct("hello")));
//! assert_eq!(response.extract_text().expect("text"), "hello");
//! ```

use rcommon::{BoxFuture, HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{HistoryEntry, TransportError, Usage};

/// Remote generation backend.
///
/// Implementations perform exactly one network call per `create_response`.
pub trait ResponsesBackend: Send + Sync + std::fmt::Debug {
    fn create_response<'a>(
        &'a self,
        request: ResponsesRequest,
    ) -> BoxFuture<'a, Result<ResponsesResponse, TransportError>>;
}

/// Outbound request body.
///
/// Unset optional fields are skipped during serialization; `extra_headers`
/// travel as HTTP headers, never in the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
    #[serde(skip)]
    pub extra_headers: Option<HeaderMap>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Convenience aggregate some backends expose directly.
    #[serde(default)]
    pub output_text: Option<String>,
    #[serde(default)]
    pub output: Vec<ResponseOutputItem>,
    #[serde(default)]
    pub usage: Option<ResponseUsage>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResponseOutputItem {
    #[serde(default, rename = "type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub content: Vec<ResponseContentPart>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResponseContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponseContentPart {
    fn text_content(&self) -> Option<&str> {
        match self.part_type.as_str() {
            "output_text" | "text" => self.text.as_deref(),
            _ => None,
        }
    }
}

/// Token counts as reported by the backend; every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ResponseUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

/// Where a response keeps its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSource<'a> {
    Direct(&'a str),
    Blocks(&'a [ResponseOutputItem]),
}

impl ResponsesResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            output_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_usage(mut self, usage: ResponseUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn text_source(&self) -> TextSource<'_> {
        match self.output_text.as_deref() {
            Some(text) => TextSource::Direct(text),
            None => TextSource::Blocks(&self.output),
        }
    }

    /// Returns the direct text, else the first text part across output blocks.
    pub fn extract_text(&self) -> Result<String, TransportError> {
        let text = match self.text_source() {
            TextSource::Direct(text) => Some(text),
            TextSource::Blocks(items) => items
                .iter()
                .flat_map(|item| item.content.iter())
                .find_map(ResponseContentPart::text_content),
        };

        text.map(str::to_string).ok_or_else(|| {
            TransportError::extraction("unable to extract text from backend response")
        })
    }

    /// Best-effort usage scrape; `None` when the backend reported nothing.
    pub fn extract_usage(&self) -> Option<Usage> {
        let usage = self.usage?;
        let usage = Usage {
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            total_tokens: usage.total_tokens,
        };

        (!usage.is_empty()).then_some(usage)
    }
}
