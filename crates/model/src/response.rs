use std::fmt::{self, Display};
use std::pin::Pin;
use std::task::{self, Poll};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::OpaqueMessage;
use crate::provider::ModelProviderError;

/// A streamed response from the model provider.
pub trait ModelResponse: Sized + Send + 'static {
    /// The error type that may be returned by the provider.
    type Error: ModelProviderError;

    /// Attempts to pull out the next event from the response.
    ///
    /// # Return value
    ///
    /// - `Poll::Pending` means the next event is not ready yet; the current
    ///   task will be woken when it may be.
    /// - `Poll::Ready(Ok(Some(event)))` delivers an event. More events may
    ///   follow.
    /// - `Poll::Ready(Ok(None))` means the response has completed.
    /// - `Poll::Ready(Err(error))` means the response failed.
    ///
    /// Calling this method after completion should always return `None`.
    fn poll_next_event(
        self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
    ) -> Poll<Result<Option<ModelResponseEvent>, Self::Error>>;

    /// Makes an [`OpaqueMessage`] holding the complete assistant message of
    /// this response, so it can be replayed in later requests.
    ///
    /// Only meaningful after all events have been polled. Implementations
    /// should return the same message every time.
    fn make_opaque_message(&self) -> Option<OpaqueMessage> {
        None
    }
}

/// Why the model stopped generating.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFinishReason {
    /// The model has finished its answer.
    Stop,
    /// The model wants one or more tools to be called.
    ToolCalls,
    /// The output was cut off by the token limit.
    Length,
    /// The output was withheld by a content filter.
    ContentFilter,
    /// The legacy single function call, superseded by tool calls.
    FunctionCall,
    /// A reason this crate does not know about.
    Other(String),
}

impl ModelFinishReason {
    /// Maps the conventional wire name of a finish reason.
    pub fn from_wire(reason: &str) -> Self {
        match reason {
            "stop" => ModelFinishReason::Stop,
            "tool_calls" => ModelFinishReason::ToolCalls,
            "length" => ModelFinishReason::Length,
            "content_filter" => ModelFinishReason::ContentFilter,
            "function_call" => ModelFinishReason::FunctionCall,
            other => ModelFinishReason::Other(other.to_owned()),
        }
    }
}

impl Display for ModelFinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFinishReason::Stop => write!(f, "stop"),
            ModelFinishReason::ToolCalls => write!(f, "tool_calls"),
            ModelFinishReason::Length => write!(f, "length"),
            ModelFinishReason::ContentFilter => write!(f, "content_filter"),
            ModelFinishReason::FunctionCall => write!(f, "function_call"),
            ModelFinishReason::Other(reason) => write!(f, "{reason}"),
        }
    }
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The identifier the result must be correlated with.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// Arguments as sent by the model. `Value::Null` when the model sent
    /// nothing or something that is not JSON.
    pub arguments: Value,
}

/// The event from a model response.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelResponseEvent {
    /// The response has been completed.
    Completed(ModelFinishReason),
    /// Received a message delta.
    MessageDelta(String),
    /// Received a tool call request.
    ToolCall(ToolCallRequest),
}
