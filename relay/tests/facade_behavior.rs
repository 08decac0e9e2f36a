use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use relay::prelude::*;
use relay::{ResponsesRequest, ResponsesResponse};

#[derive(Debug, Default)]
struct EchoBackend {
    requests: Mutex<Vec<ResponsesRequest>>,
}

impl ResponsesBackend for EchoBackend {
    fn create_response<'a>(
        &'a self,
        request: ResponsesRequest,
    ) -> BoxFuture<'a, Result<ResponsesResponse, TransportError>> {
        Box::pin(async move {
            let turn = {
                let mut requests = self.requests.lock().expect("requests lock");
                requests.push(request);
                requests.len()
            };
            Ok(ResponsesResponse::from_text(format!("reply {turn}")))
        })
    }
}

#[tokio::test]
async fn conversation_over_the_default_transport_replays_history() {
    let backend = Arc::new(EchoBackend::default());
    let options = options_for_model("gpt-5-codex")
        .with_system_prompt(preset_system_prompt("Answer tersely."))
        .with_backend(backend.clone());
    let mut client = ConversationClient::new(options);

    client.submit("A").await.expect("first turn");
    client.submit("B").await.expect("second turn");

    assert_eq!(
        client.history(),
        relay_history![
            user => "A",
            assistant => "reply 1",
            user => "B",
            assistant => "reply 2",
        ]
        .as_slice()
    );

    let requests = backend.requests.lock().expect("requests lock");
    assert_eq!(
        requests[1].input,
        relay_history![
            user => "A",
            assistant => "reply 1",
            system => "Answer tersely.",
            user => "B",
        ]
    );
}

#[tokio::test]
async fn receive_response_replays_the_last_turn() {
    let backend = Arc::new(EchoBackend::default());
    let mut client = ConversationClient::new(options_for_model("gpt-5").with_backend(backend));

    client.submit("hello").await.expect("turn");

    let messages = client
        .receive_response()
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("replayed messages");
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0].as_assistant().map(AssistantMessage::text),
        Some("reply 1".to_string())
    );
    assert_eq!(
        messages[1].as_result().and_then(|result| result.result.clone()),
        Some("reply 1".to_string())
    );
}

#[tokio::test]
async fn missing_credentials_surface_as_configuration_errors() {
    let transport = ResponsesTransport::new(options_for_model("gpt-5-codex"))
        .with_environment(Arc::new(relay::StaticEnvironment::new()));

    let messages = query_with_transport("hello", Arc::new(transport))
        .collect::<Vec<_>>()
        .await;

    assert_eq!(messages.len(), 1);
    let error = messages[0].as_ref().expect_err("must fail");
    assert_eq!(
        error.kind(),
        ChatErrorKind::Transport(TransportErrorKind::Configuration)
    );
}
