use std::future::poll_fn;
use std::pin::{Pin, pin};
use std::sync::Arc;

use playlist_agent_model::{
    ModelFinishReason, ModelProvider, ModelProviderError, ModelRequest,
    ModelResponse, ModelResponseEvent, OpaqueMessage, ToolCallRequest,
};
use tracing::Instrument;

type SendRequestResult = Result<ModelTurn, Box<dyn ModelProviderError>>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ModelRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A type-erased model provider that drains each streamed response into a
/// [`ModelTurn`].
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            let message_count = req.messages.len();
            Box::pin(
                async move {
                    trace!("sent a request with {message_count} messages");
                    collect_turn::<P>(fut.await).await
                }
                .instrument(debug_span!("model request")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and waits for the complete turn.
    #[inline]
    pub async fn send_request(&self, req: ModelRequest) -> SendRequestResult {
        (self.handler_fn)(req).await
    }
}

/// One complete assistant turn.
#[derive(Clone, Debug)]
pub struct ModelTurn {
    /// Concatenated text deltas.
    pub transcript: String,
    /// The provider's replayable form of this turn.
    pub opaque_msg: Option<OpaqueMessage>,
    /// Tool calls in the order the model requested them.
    pub tool_calls: Vec<ToolCallRequest>,
    /// `None` if the stream ended without reporting one.
    pub finish_reason: Option<ModelFinishReason>,
}

async fn collect_turn<P: ModelProvider + 'static>(
    resp_or_err: Result<P::Response, P::Error>,
) -> SendRequestResult {
    let resp = match resp_or_err {
        Ok(resp) => resp,
        Err(err) => {
            error!("model request failed: {err}");
            return Err(Box::new(err));
        }
    };

    let mut transcript = String::new();
    let mut tool_calls = Vec::new();
    let mut finish_reason = None;

    let mut pinned_resp = pin!(resp);
    loop {
        let event = poll_fn(|cx| pinned_resp.as_mut().poll_next_event(cx))
            .await
            .map_err(|err| {
                error!("model response failed: {err}");
                Box::new(err) as Box<dyn ModelProviderError>
            })?;
        let Some(event) = event else {
            break;
        };
        trace!("got an event: {event:?}");

        match event {
            ModelResponseEvent::MessageDelta(delta) => {
                transcript.push_str(&delta);
            }
            ModelResponseEvent::ToolCall(req) => {
                tool_calls.push(req);
            }
            ModelResponseEvent::Completed(reason) => {
                finish_reason = Some(reason);
            }
        }
    }

    Ok(ModelTurn {
        transcript,
        opaque_msg: pinned_resp.make_opaque_message(),
        tool_calls,
        finish_reason,
    })
}

#[cfg(test)]
mod tests {
    use playlist_agent_model::{ErrorKind, ModelMessage};
    use playlist_agent_test_model::{
        PresetEvent, PresetResponse, TestModelProvider,
    };
    use serde_json::json;

    use super::*;

    fn question() -> ModelRequest {
        ModelRequest {
            messages: vec![ModelMessage::User("Any duplicates?".to_owned())],
            tools: vec![],
        }
    }

    #[tokio::test]
    async fn test_send_request() {
        let mut model_provider = TestModelProvider::default();
        model_provider.add_assistant_turn(PresetResponse::with_events([
            PresetEvent::MessageDelta("Checking ".to_owned()),
            PresetEvent::MessageDelta("both.".to_owned()),
            PresetEvent::ToolCall(ToolCallRequest {
                id: "call_1".to_owned(),
                name: "get_playlist".to_owned(),
                arguments: json!({ "id": "p1" }),
            }),
            PresetEvent::ToolCall(ToolCallRequest {
                id: "call_2".to_owned(),
                name: "get_playlist".to_owned(),
                arguments: json!({ "id": "p2" }),
            }),
        ]));
        let model_client = ModelClient::new(model_provider);

        // The same request always maps to the same turn.
        for _ in 0..2 {
            let turn = model_client.send_request(question()).await.unwrap();
            assert_eq!(turn.transcript, "Checking both.");
            assert!(turn.opaque_msg.is_some());
            let ids: Vec<_> =
                turn.tool_calls.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, ["call_1", "call_2"]);
            assert_eq!(turn.finish_reason, Some(ModelFinishReason::ToolCalls));
        }
    }

    #[tokio::test]
    async fn test_missing_finish_reason() {
        let mut model_provider = TestModelProvider::default();
        model_provider.add_assistant_turn(
            PresetResponse::text("Half an answer").without_finish_reason(),
        );
        let model_client = ModelClient::new(model_provider);
        let turn = model_client.send_request(question()).await.unwrap();
        assert_eq!(turn.finish_reason, None);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let model_client = ModelClient::new(TestModelProvider::default());
        let err = model_client.send_request(question()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
