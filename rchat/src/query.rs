//! One-shot queries: a single prompt in, a stream of typed messages out.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use rtransport::{Options, ResponsesTransport, Transport};

use crate::{ChatError, Message, parse_message};

pub type MessageStream<'a> = Pin<Box<dyn Stream<Item = Result<Message, ChatError>> + Send + 'a>>;

/// Runs `prompt` against a fresh [`ResponsesTransport`] built from `options`.
///
/// Nothing is sent until the returned stream is first polled.
pub fn query(prompt: impl Into<String>, options: Options) -> MessageStream<'static> {
    query_with_transport(prompt, Arc::new(ResponsesTransport::new(options)))
}

/// Runs `prompt` against a caller-supplied transport with no prior history.
pub fn query_with_transport(
    prompt: impl Into<String>,
    transport: Arc<dyn Transport>,
) -> MessageStream<'static> {
    let prompt = prompt.into();

    Box::pin(stream! {
        tracing::debug!(phase = "query", event = "query_start", prompt_chars = prompt.chars().count());

        let mut records = transport.generate(&prompt, None);
        let mut yielded = 0_usize;
        while let Some(record) = records.next().await {
            match record {
                Ok(raw) => {
                    yielded += 1;
                    yield Ok(parse_message(&raw));
                }
                Err(error) => {
                    tracing::warn!(phase = "query", event = "query_failed", error = %error);
                    yield Err(ChatError::from(error));
                }
            }
        }

        tracing::debug!(phase = "query", event = "query_complete", messages = yielded);
    })
}
