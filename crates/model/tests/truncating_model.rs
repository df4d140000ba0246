use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::{poll_fn, ready};
use std::pin::Pin;
use std::task::{self, Poll, ready};
use std::time::Duration;

use playlist_agent_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelProvider,
    ModelProviderError, ModelRequest, ModelResponse, ModelResponseEvent,
};
use tokio::time::{Sleep, sleep};

#[derive(Debug)]
struct TruncatingModelError(ErrorKind);

impl Display for TruncatingModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "truncating model failed: {}", self.0)
    }
}

impl Error for TruncatingModelError {}

impl ModelProviderError for TruncatingModelError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Repeats the user's words back, but only up to `max_words` of them.
#[derive(Debug)]
struct TruncatingModelResponse {
    words: VecDeque<String>,
    budget: usize,
    finish_reason: Option<ModelFinishReason>,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl ModelResponse for TruncatingModelResponse {
    type Error = TruncatingModelError;

    fn poll_next_event(
        self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
    ) -> Poll<Result<Option<ModelResponseEvent>, Self::Error>> {
        let this = self.get_mut();
        let timer = this
            .sleep
            .get_or_insert_with(|| Box::pin(sleep(Duration::from_millis(1))));
        ready!(timer.as_mut().poll(cx));
        this.sleep = None;

        if this.budget > 0 {
            if let Some(word) = this.words.pop_front() {
                this.budget -= 1;
                let delta = if this.words.is_empty() || this.budget == 0 {
                    word
                } else {
                    format!("{word} ")
                };
                return Poll::Ready(Ok(Some(ModelResponseEvent::MessageDelta(
                    delta,
                ))));
            }
        }

        Poll::Ready(Ok(this.finish_reason.take().map(|reason| {
            ModelResponseEvent::Completed(reason)
        })))
    }
}

struct TruncatingModelProvider {
    max_words: usize,
}

impl ModelProvider for TruncatingModelProvider {
    type Error = TruncatingModelError;
    type Response = TruncatingModelResponse;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + 'static
    {
        let input = req.messages.iter().rev().find_map(|msg| match msg {
            ModelMessage::User(text) => Some(text.clone()),
            _ => None,
        });
        let result = match input {
            Some(input) => {
                let words: VecDeque<String> =
                    input.split(' ').map(ToOwned::to_owned).collect();
                let finish_reason = if words.len() > self.max_words {
                    ModelFinishReason::Length
                } else {
                    ModelFinishReason::Stop
                };
                Ok(TruncatingModelResponse {
                    words,
                    budget: self.max_words,
                    finish_reason: Some(finish_reason),
                    sleep: None,
                })
            }
            None => Err(TruncatingModelError(ErrorKind::Other)),
        };
        ready(result)
    }
}

async fn collect(
    mut resp: TruncatingModelResponse,
) -> (String, Option<ModelFinishReason>) {
    let mut text = String::new();
    let mut finish_reason = None;
    while let Some(event) =
        poll_fn(|cx| Pin::new(&mut resp).poll_next_event(cx))
            .await
            .unwrap()
    {
        match event {
            ModelResponseEvent::MessageDelta(delta) => text.push_str(&delta),
            ModelResponseEvent::Completed(reason) => finish_reason = Some(reason),
            ModelResponseEvent::ToolCall(req) => {
                unreachable!("unexpected tool call: {req:?}")
            }
        }
    }
    (text, finish_reason)
}

#[tokio::test]
async fn test_complete_answer_stops() {
    let provider = TruncatingModelProvider { max_words: 8 };
    let req = ModelRequest {
        messages: vec![ModelMessage::User("list my playlists".to_owned())],
        tools: vec![],
    };
    let resp = provider.send_request(&req).await.unwrap();
    let (text, finish_reason) = collect(resp).await;
    assert_eq!(text, "list my playlists");
    assert_eq!(finish_reason, Some(ModelFinishReason::Stop));
}

#[tokio::test]
async fn test_long_answer_is_cut_off() {
    let provider = TruncatingModelProvider { max_words: 2 };
    let req = ModelRequest {
        messages: vec![ModelMessage::User("find duplicate tracks".to_owned())],
        tools: vec![],
    };
    let resp = provider.send_request(&req).await.unwrap();
    let (text, finish_reason) = collect(resp).await;
    assert_eq!(text, "find duplicate");
    assert_eq!(finish_reason, Some(ModelFinishReason::Length));
}

#[tokio::test]
async fn test_request_without_user_input() {
    let provider = TruncatingModelProvider { max_words: 2 };
    let req = ModelRequest {
        messages: vec![ModelMessage::System("be brief".to_owned())],
        tools: vec![],
    };
    let err = provider.send_request(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
}
