use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use playlist_agent_model::{
    ErrorKind, ModelFinishReason, ModelResponse, ModelResponseEvent,
    OpaqueMessage, ToolCallRequest,
};
use pin_project_lite::pin_project;
use serde_json::Value;

use crate::Error;
use crate::io::Sse;
use crate::proto::{ChatCompletionChunk, Message, ToolCall};

/// Everything accumulated from the stream so far.
struct PartialState {
    sse: Sse,
    stream_done: bool,
    id: Option<String>,
    content: String,
    tool_calls: Vec<ToolCall>,
    // Indexes into `tool_calls` that have not been handed out as events.
    // Tool calls are only emitted after the stream is done, because their
    // arguments arrive in fragments.
    pending_tool_call_idx: VecDeque<usize>,
    pending_finish_reason: Option<ModelFinishReason>,
}

impl PartialState {
    fn finish(self) -> Option<(String, Message)> {
        let content = if self.content.is_empty() {
            None
        } else {
            Some(self.content)
        };
        let tool_calls = if self.tool_calls.is_empty() {
            None
        } else {
            Some(self.tool_calls)
        };
        Some((
            self.id?,
            Message::Assistant {
                content,
                tool_calls,
            },
        ))
    }

    /// Reads the stream until a content delta shows up or the stream ends.
    async fn pull(&mut self) -> Result<Option<String>, Error> {
        loop {
            let sse_event = match self.sse.next_event().await {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(err) => {
                    return Err(Error::new(
                        format!("malformed event stream: {err:?}"),
                        ErrorKind::Other,
                    ));
                }
            };
            trace!("got sse event: {sse_event}");
            if sse_event == "[DONE]" {
                break;
            }

            let mut chunk =
                serde_json::from_str::<ChatCompletionChunk>(&sse_event)
                    .map_err(|err| {
                        Error::new(format!("{err}"), ErrorKind::Other)
                    })?;
            if self.id.get_or_insert_with(|| chunk.id.clone()) != &chunk.id {
                return Err(Error::new("chunk id mismatch", ErrorKind::Other));
            }

            // The usage chunk has no choices.
            let Some(choice) = chunk.choices.pop() else {
                continue;
            };

            if let Some(tool_calls) = choice.delta.tool_calls {
                for fragment in tool_calls {
                    self.merge_tool_call(fragment);
                }
            }

            if let Some(finish_reason) = choice.finish_reason {
                self.pending_finish_reason =
                    Some(ModelFinishReason::from_wire(&finish_reason));
                self.stream_done = true;
                return Ok(choice.delta.content.filter(|c| !c.is_empty()).map(
                    |content| {
                        self.content.push_str(&content);
                        content
                    },
                ));
            }

            if let Some(content) = choice.delta.content {
                if !content.is_empty() {
                    self.content.push_str(&content);
                    return Ok(Some(content));
                }
            }
        }
        self.stream_done = true;
        Ok(None)
    }

    fn merge_tool_call(&mut self, fragment: ToolCall) {
        let Some(partial) = self
            .tool_calls
            .iter_mut()
            .find(|t| t.index == fragment.index)
        else {
            self.pending_tool_call_idx.push_back(self.tool_calls.len());
            self.tool_calls.push(fragment);
            return;
        };
        if let Some(id) = fragment.id {
            partial.id.get_or_insert_default().push_str(&id);
        }
        if let Some(ty) = fragment.r#type {
            partial.r#type.get_or_insert_default().push_str(&ty);
        }
        let Some(function) = fragment.function else {
            return;
        };
        let Some(partial_func) = &mut partial.function else {
            partial.function = Some(function);
            return;
        };
        if let Some(name) = function.name {
            partial_func.name.get_or_insert_default().push_str(&name);
        }
        if let Some(arguments) = function.arguments {
            partial_func
                .arguments
                .get_or_insert_default()
                .push_str(&arguments);
        }
    }

    fn tool_call_request(&self, idx: usize) -> ToolCallRequest {
        let tool_call = &self.tool_calls[idx];
        let function = tool_call.function.as_ref();
        let name = function.and_then(|f| f.name.clone()).unwrap_or_default();
        let raw_arguments = function
            .and_then(|f| f.arguments.as_deref())
            .unwrap_or_default();
        let arguments = match serde_json::from_str::<Value>(raw_arguments) {
            Ok(arguments) => arguments,
            Err(err) => {
                debug!("tool call {name} has unparsable arguments: {err}");
                Value::Null
            }
        };
        ToolCallRequest {
            id: tool_call.id.clone().unwrap_or_default(),
            name,
            arguments,
        }
    }
}

type PinnedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type NextEvent = Result<(Option<ModelResponseEvent>, PartialState), Error>;

pin_project! {
    /// A streamed chat completion.
    pub struct OpenAIResponse {
        next_event_fut: Option<PinnedFuture<NextEvent>>,
        full_msg: Option<(String, Message)>,
    }
}

impl OpenAIResponse {
    pub(crate) fn from_sse(sse: Sse) -> Self {
        let partial_state = PartialState {
            sse,
            stream_done: false,
            id: None,
            content: String::new(),
            tool_calls: Vec::new(),
            pending_tool_call_idx: VecDeque::new(),
            pending_finish_reason: None,
        };
        Self {
            next_event_fut: Some(Box::pin(next_event(partial_state))),
            full_msg: None,
        }
    }
}

impl ModelResponse for OpenAIResponse {
    type Error = Error;

    fn poll_next_event(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<ModelResponseEvent>, Self::Error>> {
        let this = self.project();
        let Some(next_event_fut) = this.next_event_fut else {
            return Poll::Ready(Ok(None));
        };
        let (event, partial_state) =
            match ready!(next_event_fut.as_mut().poll(cx)) {
                Ok((Some(event), partial_state)) => (event, partial_state),
                Ok((None, partial_state)) => {
                    *this.next_event_fut = None;
                    *this.full_msg = partial_state.finish();
                    return Poll::Ready(Ok(None));
                }
                Err(err) => {
                    *this.next_event_fut = None;
                    return Poll::Ready(Err(err));
                }
            };

        *this.next_event_fut = Some(Box::pin(next_event(partial_state)));
        Poll::Ready(Ok(Some(event)))
    }

    fn make_opaque_message(&self) -> Option<OpaqueMessage> {
        self.full_msg
            .as_ref()
            .map(|(id, msg)| OpaqueMessage::new(id, msg.clone()))
    }
}

/// Produces the next event. Content deltas come first as they arrive, then
/// every tool call, then the finish reason.
async fn next_event(mut partial_state: PartialState) -> NextEvent {
    if !partial_state.stream_done {
        if let Some(delta) = partial_state.pull().await? {
            return Ok((
                Some(ModelResponseEvent::MessageDelta(delta)),
                partial_state,
            ));
        }
    }

    if let Some(idx) = partial_state.pending_tool_call_idx.pop_front() {
        let request = partial_state.tool_call_request(idx);
        return Ok((Some(ModelResponseEvent::ToolCall(request)), partial_state));
    }

    if let Some(finish_reason) = partial_state.pending_finish_reason.take() {
        return Ok((
            Some(ModelResponseEvent::Completed(finish_reason)),
            partial_state,
        ));
    }

    Ok((None, partial_state))
}
