//! A scripted fake model for tests.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, ready};
use std::time::Duration;

use playlist_agent_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelRequest,
    ModelResponse, ModelResponseEvent, OpaqueMessage,
};
use tokio::time::{Sleep, sleep};

const EVENT_DELAY: Duration = Duration::from_millis(1);

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

pub struct TestModelResponse {
    turn: usize,
    transcript: String,
    events: VecDeque<ModelResponseEvent>,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl ModelResponse for TestModelResponse {
    type Error = Error;

    fn poll_next_event(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<ModelResponseEvent>, Self::Error>> {
        let this = self.get_mut();
        let timer =
            this.sleep.get_or_insert_with(|| Box::pin(sleep(EVENT_DELAY)));
        ready!(timer.as_mut().poll(cx));
        this.sleep = None;
        Poll::Ready(Ok(this.events.pop_front()))
    }

    fn make_opaque_message(&self) -> Option<OpaqueMessage> {
        let id = format!("msg:{}", self.turn);
        Some(OpaqueMessage::new(id, self.transcript.clone()))
    }
}

/// A fake model that answers from a script.
///
/// The response for a request is chosen by how many assistant turns the
/// request already contains: the first request gets the first preset, the
/// request after one assistant turn gets the second, and so on. Running out
/// of presets is an error.
///
/// Every request is recorded and can be inspected with
/// [`requests`](Self::requests).
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Vec<PresetResponse>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl TestModelProvider {
    /// Appends the response for the next assistant turn.
    #[inline]
    pub fn add_assistant_turn(&mut self, preset: PresetResponse) {
        self.script.push(preset);
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = Error;
    type Response = TestModelResponse;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + 'static
    {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req.clone());
        }

        let turn = req
            .messages
            .iter()
            .filter(|msg| {
                matches!(msg, ModelMessage::Assistant(_) | ModelMessage::Opaque(_))
            })
            .count();
        let result = match self.script.get(turn) {
            Some(preset) => {
                let mut transcript = String::new();
                let mut events = VecDeque::new();
                for event in &preset.events {
                    events.push_back(match event {
                        PresetEvent::MessageDelta(delta) => {
                            transcript.push_str(delta);
                            ModelResponseEvent::MessageDelta(delta.clone())
                        }
                        PresetEvent::ToolCall(req) => {
                            ModelResponseEvent::ToolCall(req.clone())
                        }
                    });
                }
                if let Some(reason) = preset.finish_reason() {
                    events.push_back(ModelResponseEvent::Completed(reason));
                }
                Ok(TestModelResponse {
                    turn,
                    transcript,
                    events,
                    sleep: None,
                })
            }
            None => Err(Error {
                message: format!("no preset for assistant turn {turn}"),
                kind: ErrorKind::Other,
            }),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use std::future::poll_fn;

    use playlist_agent_model::{
        ModelFinishReason, ModelTool, ToolCallRequest,
    };
    use serde_json::json;

    use super::*;

    async fn collect_response(
        mut resp: TestModelResponse,
    ) -> (String, Vec<ToolCallRequest>, Option<ModelFinishReason>) {
        let mut msg = String::new();
        let mut tool_calls = Vec::new();
        let mut finish_reason = None;
        while let Some(event) =
            poll_fn(|cx| Pin::new(&mut resp).poll_next_event(cx))
                .await
                .unwrap()
        {
            match event {
                ModelResponseEvent::Completed(reason) => {
                    finish_reason = Some(reason)
                }
                ModelResponseEvent::MessageDelta(delta) => {
                    msg.push_str(&delta);
                }
                ModelResponseEvent::ToolCall(req) => tool_calls.push(req),
            }
        }
        (msg, tool_calls, finish_reason)
    }

    #[tokio::test]
    async fn test_script_follows_assistant_turns() {
        let mut provider = TestModelProvider::default();
        provider.add_assistant_turn(PresetResponse::with_events([
            PresetEvent::MessageDelta("Let me ".to_owned()),
            PresetEvent::MessageDelta("check.".to_owned()),
            PresetEvent::ToolCall(ToolCallRequest {
                id: "call_1".to_owned(),
                name: "list_playlists".to_owned(),
                arguments: json!({}),
            }),
        ]));
        provider.add_assistant_turn(PresetResponse::text("No duplicates."));

        let mut req = ModelRequest {
            messages: vec![ModelMessage::User("Any duplicates?".to_owned())],
            tools: vec![ModelTool {
                name: "list_playlists".to_owned(),
                description: "Lists playlists".to_owned(),
                parameters: None,
            }],
        };
        let resp = provider.send_request(&req).await.unwrap();
        let opaque_msg = resp.make_opaque_message().unwrap();
        let (msg, tool_calls, finish_reason) = collect_response(resp).await;
        assert_eq!(msg, "Let me check.");
        assert_eq!(tool_calls.len(), 1);
        assert_eq!(finish_reason, Some(ModelFinishReason::ToolCalls));
        assert_eq!(opaque_msg.to_raw::<String>().unwrap(), "Let me check.");

        req.messages.push(ModelMessage::Opaque(opaque_msg));
        let resp = provider.send_request(&req).await.unwrap();
        let (msg, tool_calls, finish_reason) = collect_response(resp).await;
        assert_eq!(msg, "No duplicates.");
        assert!(tool_calls.is_empty());
        assert_eq!(finish_reason, Some(ModelFinishReason::Stop));

        assert_eq!(provider.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_script_exhausted() {
        let provider = TestModelProvider::default();
        let req = ModelRequest {
            messages: vec![ModelMessage::User("Hi".to_owned())],
            tools: vec![],
        };
        let Err(err) = provider.send_request(&req).await else {
            panic!("an empty script should not answer");
        };
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
