//! Stateful conversation client that replays history on every turn.

use std::sync::Arc;

use futures_util::StreamExt;
use rtransport::{HistoryEntry, Options, RawRecord, ResponsesTransport, Transport};

use crate::{ChatError, Message, MessageStream, parse_message};

/// Owns one conversation: the running history and the last response batch.
///
/// Turns are submitted through `&mut self`, so one client never runs two
/// turns at once.
pub struct ConversationClient {
    transport: Arc<dyn Transport>,
    history: Vec<HistoryEntry>,
    last_response: Vec<Message>,
}

impl ConversationClient {
    pub fn new(options: Options) -> Self {
        Self::with_transport(Arc::new(ResponsesTransport::new(options)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            history: Vec::new(),
            last_response: Vec::new(),
        }
    }

    /// Sends `prompt` with the accumulated history and records the reply.
    ///
    /// On error the client is left exactly as it was.
    pub async fn submit(&mut self, prompt: &str) -> Result<(), ChatError> {
        tracing::debug!(
            phase = "chat",
            event = "turn_start",
            history_len = self.history.len()
        );

        let mut raw_records = Vec::new();
        {
            let mut records = self.transport.generate(prompt, Some(self.history.as_slice()));
            while let Some(record) = records.next().await {
                match record {
                    Ok(record) => raw_records.push(record),
                    Err(error) => {
                        tracing::warn!(phase = "chat", event = "turn_failed", error = %error);
                        return Err(error.into());
                    }
                }
            }
        }

        self.last_response = raw_records.iter().map(parse_message).collect();
        self.history.push(HistoryEntry::user(prompt));
        self.history
            .extend(raw_records.into_iter().filter_map(|record| match record {
                RawRecord::Assistant { message, .. } => {
                    Some(HistoryEntry::assistant(message.content))
                }
                _ => None,
            }));

        tracing::info!(
            phase = "chat",
            event = "turn_complete",
            messages = self.last_response.len(),
            history_len = self.history.len()
        );

        Ok(())
    }

    pub fn last_response(&self) -> &[Message] {
        &self.last_response
    }

    /// Replays the last response batch. Can be called any number of times.
    pub fn receive_response(&self) -> MessageStream<'static> {
        let messages = self.last_response.iter().cloned().map(Ok).collect::<Vec<_>>();
        Box::pin(futures_util::stream::iter(messages))
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Releases the last response batch. History is kept.
    pub fn close(&mut self) {
        self.last_response.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_stream::stream;
    use rtransport::{
        ContentSegment, RawResult, RecordStream, SessionId, TransportError, TransportErrorKind,
    };

    use super::*;
    use crate::{ChatErrorKind, ContentBlock};

    #[derive(Debug, Clone, PartialEq)]
    struct RecordedCall {
        prompt: String,
        history: Option<Vec<HistoryEntry>>,
    }

    struct StubTransport {
        replies: Mutex<Vec<Result<Vec<RawRecord>, TransportError>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl StubTransport {
        fn replying(replies: Vec<Result<Vec<RawRecord>, TransportError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    impl Transport for StubTransport {
        fn generate<'a>(
            &'a self,
            prompt: &'a str,
            history: Option<&'a [HistoryEntry]>,
        ) -> RecordStream<'a> {
            Box::pin(stream! {
                self.calls.lock().expect("calls lock").push(RecordedCall {
                    prompt: prompt.to_string(),
                    history: history.map(<[HistoryEntry]>::to_vec),
                });
                let reply = self.replies.lock().expect("replies lock").remove(0);
                match reply {
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

    fn reply(text: &str) -> Vec<RawRecord> {
        vec![
            RawRecord::assistant_text("gpt-5-codex", text),
            RawRecord::Result(RawResult::success(
                1,
                SessionId::new(format!("session-{text}")),
                text,
                None,
            )),
        ]
    }

    #[tokio::test]
    async fn submit_replays_history_on_the_next_turn() {
        let transport = Arc::new(StubTransport::replying(vec![
            Ok(reply("reply A")),
            Ok(reply("reply B")),
        ]));
        let mut client = ConversationClient::with_transport(transport.clone());

        client.submit("A").await.expect("first turn");
        client.submit("B").await.expect("second turn");

        let calls = transport.calls();
        assert_eq!(calls[0].prompt, "A");
        assert_eq!(calls[0].history, Some(Vec::new()));
        assert_eq!(calls[1].prompt, "B");
        assert_eq!(
            calls[1].history,
            Some(vec![
                HistoryEntry::user("A"),
                HistoryEntry::assistant(vec![ContentSegment::text("reply A")]),
            ])
        );
        assert_eq!(client.history().len(), 4);
    }

    #[tokio::test]
    async fn last_response_holds_the_parsed_batch() {
        let transport = Arc::new(StubTransport::replying(vec![Ok(reply("42"))]));
        let mut client = ConversationClient::with_transport(transport);
        assert!(client.last_response().is_empty());

        client.submit("What is the answer?").await.expect("turn");

        let messages = client.last_response();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].as_assistant().map(|message| message.content.clone()),
            Some(vec![ContentBlock::text("42")])
        );
        assert!(messages[1].as_result().is_some_and(|result| !result.is_error));
    }

    #[tokio::test]
    async fn receive_response_can_be_replayed() {
        let transport = Arc::new(StubTransport::replying(vec![Ok(reply("42"))]));
        let mut client = ConversationClient::with_transport(transport);
        assert!(client.receive_response().next().await.is_none());

        client.submit("q").await.expect("turn");

        let first = client.receive_response().collect::<Vec<_>>().await;
        let second = client.receive_response().collect::<Vec<_>>().await;
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn failed_submit_leaves_state_untouched() {
        let transport = Arc::new(StubTransport::replying(vec![
            Ok(reply("first")),
            Err(TransportError::extraction("no text")),
        ]));
        let mut client = ConversationClient::with_transport(transport);

        client.submit("one").await.expect("first turn");
        let history_before = client.history().to_vec();
        let response_before = client.last_response().to_vec();

        let error = client.submit("two").await.expect_err("must fail");
        assert_eq!(
            error.kind(),
            ChatErrorKind::Transport(TransportErrorKind::Extraction)
        );
        assert_eq!(client.history(), history_before.as_slice());
        assert_eq!(client.last_response(), response_before.as_slice());
    }

    #[tokio::test]
    async fn non_assistant_records_do_not_extend_history() {
        let transport = Arc::new(StubTransport::replying(vec![Ok(vec![RawRecord::Result(
            RawResult::success(1, SessionId::new("s"), "only result", None),
        )])]));
        let mut client = ConversationClient::with_transport(transport);

        client.submit("hi").await.expect("turn");

        assert_eq!(client.history(), &[HistoryEntry::user("hi")]);
    }

    #[tokio::test]
    async fn close_clears_last_response_but_keeps_history() {
        let transport = Arc::new(StubTransport::replying(vec![Ok(reply("x"))]));
        let mut client = ConversationClient::with_transport(transport);
        client.submit("hi").await.expect("turn");

        client.close();

        assert!(client.last_response().is_empty());
        assert_eq!(client.history().len(), 2);
    }
}
