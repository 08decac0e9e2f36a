//! Transport contract and the default responses-backed implementation.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use async_stream::stream;
use futures_core::Stream;
use rcommon::SessionId;
use tokio::sync::OnceCell;

use crate::{
    EnvironmentSource, HistoryEntry, Options, ProcessEnvironment, RawRecord, RawResult,
    ResponseFormat, ResponsesBackend, ResponsesRequest, SystemPrompt, TransportError,
    resolve_credentials,
};

pub type RecordStream<'a> =
    Pin<Box<dyn Stream<Item = Result<RawRecord, TransportError>> + Send + 'a>>;

pub type PromptStream<'a> = Pin<Box<dyn Stream<Item = HistoryEntry> + Send + 'a>>;

/// Turns a prompt plus prior history into raw wire records.
///
/// Invariants for consumers:
/// - `generate` does no work until the stream is first polled.
/// - A call either yields all of its records or fails before yielding any.
/// - `stream` is a capability seam; the default rejects it immediately.
pub trait Transport: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        history: Option<&'a [HistoryEntry]>,
    ) -> RecordStream<'a>;

    fn stream<'a>(&'a self, _prompts: PromptStream<'a>) -> Result<RecordStream<'a>, TransportError> {
        Err(TransportError::unsupported(
            "streaming prompts are not supported by this transport",
        ))
    }
}

/// Default transport over a [`ResponsesBackend`].
///
/// The backend is resolved on first use and reused for the lifetime of this
/// transport instance.
#[derive(Debug)]
pub struct ResponsesTransport {
    options: Options,
    environment: Arc<dyn EnvironmentSource>,
    backend: OnceCell<Arc<dyn ResponsesBackend>>,
}

impl ResponsesTransport {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            environment: Arc::new(ProcessEnvironment),
            backend: OnceCell::new(),
        }
    }

    pub fn with_environment(mut self, environment: Arc<dyn EnvironmentSource>) -> Self {
        self.environment = environment;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Assembles the outbound request: history, then the system entry, then the prompt.
    pub fn build_request(
        &self,
        prompt: &str,
        history: Option<&[HistoryEntry]>,
    ) -> ResponsesRequest {
        let mut input = history.map(<[HistoryEntry]>::to_vec).unwrap_or_default();
        if let Some(system_text) = self
            .options
            .system_prompt
            .as_ref()
            .and_then(SystemPrompt::resolved_text)
        {
            input.push(HistoryEntry::system(system_text));
        }

        input.push(HistoryEntry::user(prompt));

        let extra_headers = if self.options.extra_headers.is_empty() {
            None
        } else {
            Some(self.options.extra_headers.clone())
        };

        ResponsesRequest {
            model: self.options.resolved_model(),
            input,
            temperature: self.options.temperature,
            max_output_tokens: self.options.max_output_tokens,
            response_format: self
                .options
                .response_format
                .as_ref()
                .map(ResponseFormat::to_request_value),
            extra_headers,
        }
    }

    async fn backend(&self) -> Result<&Arc<dyn ResponsesBackend>, TransportError> {
        self.backend
            .get_or_try_init(|| async { self.create_backend() })
            .await
    }

    fn create_backend(&self) -> Result<Arc<dyn ResponsesBackend>, TransportError> {
        if let Some(backend) = &self.options.backend {
            return Ok(Arc::clone(backend));
        }

        let credentials = resolve_credentials(&self.options, self.environment.as_ref())?;
        let backend = default_backend(&self.options, credentials)?;
        tracing::debug!(
            phase = "transport",
            event = "backend_initialized",
            base_url = self.options.resolved_base_url()
        );

        Ok(backend)
    }

    async fn round_trip(
        &self,
        prompt: &str,
        history: Option<&[HistoryEntry]>,
    ) -> Result<[RawRecord; 2], TransportError> {
        let request = self.build_request(prompt, history);
        let backend = self.backend().await?;
        let model = request.model.clone();

        tracing::debug!(
            phase = "transport",
            event = "request_start",
            model = %model,
            input_entries = request.input.len()
        );

        let started = Instant::now();
        let response = backend.create_response(request).await?;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let text = response.extract_text().inspect_err(|error| {
            tracing::warn!(
                phase = "transport",
                event = "extraction_failed",
                model = %model,
                error = %error
            );
        })?;
        let usage = response.extract_usage();

        tracing::info!(
            phase = "transport",
            event = "request_complete",
            model = %model,
            duration_ms,
            has_usage = usage.is_some()
        );

        Ok([
            RawRecord::assistant_text(model, text.clone()),
            RawRecord::Result(RawResult::success(
                duration_ms,
                SessionId::generate(),
                text,
                usage,
            )),
        ])
    }
}

impl Transport for ResponsesTransport {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        history: Option<&'a [HistoryEntry]>,
    ) -> RecordStream<'a> {
        Box::pin(stream! {
            match self.round_trip(prompt, history).await {
                Ok(records) => {
                    for record in records {
                        yield Ok(record);
                    }
                }
                Err(error) => {
                    yield Err(error);
                }
            }
        })
    }
}

#[cfg(feature = "backend-http")]
fn default_backend(
    options: &Options,
    credentials: crate::ResolvedCredentials,
) -> Result<Arc<dyn ResponsesBackend>, TransportError> {
    let backend = crate::ResponsesHttpBackend::from_options(options, credentials)?;
    Ok(Arc::new(backend))
}

#[cfg(not(feature = "backend-http"))]
fn default_backend(
    _options: &Options,
    _credentials: crate::ResolvedCredentials,
) -> Result<Arc<dyn ResponsesBackend>, TransportError> {
    Err(TransportError::configuration(
        "no backend configured and the backend-http feature is disabled",
    ))
}
