//! Transport configuration: model selection, credentials, sampling and prompt settings.
//!
//! ```rust
//! use rtransport::{Options, SystemPrompt};
//!
//! let options = Options::new()
//!     .with_model("gpt-5")
//!     .with_temperature(0.3)
//!     .with_max_output_tokens(256)
//!     .with_response_format("text")
//!     .with_system_prompt(SystemPrompt::preset_with_append("Answer tersely."));
//!
//! assert_eq!(options.resolved_model(), "gpt-5");
//! assert_eq!(Options::new().resolved_model(), "gpt-5-codex");
//! ```

use std::sync::Arc;
use std::time::Duration;

use rcommon::HeaderMap;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{ResponsesBackend, SecretString, TransportError};

pub const DEFAULT_MODEL: &str = "gpt-5-codex";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Immutable configuration bundle read by a transport.
///
/// Every optional field left unset is omitted from outbound requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    pub model: Option<String>,
    pub api_key: Option<SecretString>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub response_format: Option<ResponseFormat>,
    pub system_prompt: Option<SystemPrompt>,
    pub extra_headers: HeaderMap,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    /// Pre-built backend; when set, credentials are never resolved.
    #[serde(skip)]
    pub backend: Option<Arc<dyn ResponsesBackend>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON document. Unknown keys are ignored.
    pub fn from_json_str(input: &str) -> Result<Self, TransportError> {
        serde_json::from_str(input)
            .map_err(|err| TransportError::invalid_input(format!("invalid options: {err}")))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key));
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_response_format(mut self, response_format: impl Into<ResponseFormat>) -> Self {
        self.response_format = Some(response_format.into());
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<SystemPrompt>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_backend(mut self, backend: Arc<dyn ResponsesBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Model sent to the backend; empty or unset falls back to [`DEFAULT_MODEL`].
    pub fn resolved_model(&self) -> String {
        match self.model.as_deref() {
            Some(model) if !model.is_empty() => model.to_string(),
            _ => DEFAULT_MODEL.to_string(),
        }
    }

    pub fn resolved_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Requested output format for the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseFormat {
    /// Shorthand such as `"text"`, sent as `{"type": "text"}`.
    Named(String),
    Structured(Value),
}

impl ResponseFormat {
    pub fn to_request_value(&self) -> Value {
        match self {
            Self::Named(name) => json!({ "type": name }),
            Self::Structured(value) => value.clone(),
        }
    }
}

impl From<&str> for ResponseFormat {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl From<String> for ResponseFormat {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

impl From<Value> for ResponseFormat {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPreset {
    ClaudeCode,
}

/// System prompt: raw text or a named preset with an optional appended fragment.
///
/// Deserializes from either a string or
/// `{"type": "preset", "preset": "claude_code", "append": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SystemPromptRepr")]
pub enum SystemPrompt {
    Text(String),
    Preset {
        preset: PromptPreset,
        append: Option<String>,
    },
}

impl SystemPrompt {
    pub fn preset() -> Self {
        Self::Preset {
            preset: PromptPreset::ClaudeCode,
            append: None,
        }
    }

    pub fn preset_with_append(append: impl Into<String>) -> Self {
        Self::Preset {
            preset: PromptPreset::ClaudeCode,
            append: Some(append.into()),
        }
    }

    /// Text placed in the system input entry, if any.
    ///
    /// Presets contribute only their `append` fragment.
    pub fn resolved_text(&self) -> Option<&str> {
        let text = match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Preset { append, .. } => append.as_deref(),
        };

        text.filter(|text| !text.is_empty())
    }
}

impl From<&str> for SystemPrompt {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SystemPrompt {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SystemPromptRepr {
    Text(String),
    Tagged(TaggedSystemPrompt),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedSystemPrompt {
    Preset {
        preset: PromptPreset,
        #[serde(default)]
        append: Option<String>,
    },
}

impl From<SystemPromptRepr> for SystemPrompt {
    fn from(value: SystemPromptRepr) -> Self {
        match value {
            SystemPromptRepr::Text(text) => Self::Text(text),
            SystemPromptRepr::Tagged(TaggedSystemPrompt::Preset { preset, append }) => {
                Self::Preset { preset, append }
            }
        }
    }
}
