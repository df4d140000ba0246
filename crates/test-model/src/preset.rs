use playlist_agent_model::{ModelFinishReason, ToolCallRequest};

/// The events in a preset response.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PresetEvent {
    /// A piece of the answer text.
    MessageDelta(String),
    /// A request to call a tool.
    ToolCall(ToolCallRequest),
}

/// How a preset response ends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresetFinish {
    /// `ToolCalls` if the response has any tool call, `Stop` otherwise.
    #[default]
    Inferred,
    /// Always finish with the given reason.
    Reason(ModelFinishReason),
    /// End the stream without reporting a finish reason.
    Missing,
}

/// The preset response for one assistant turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PresetResponse {
    /// Events in this response.
    pub events: Vec<PresetEvent>,
    /// How the response ends.
    pub finish: PresetFinish,
}

impl PresetResponse {
    /// Creates a `PresetResponse` with the specified events.
    #[inline]
    pub fn with_events(events: impl Into<Vec<PresetEvent>>) -> Self {
        Self {
            events: events.into(),
            finish: PresetFinish::Inferred,
        }
    }

    /// Creates a plain text answer that finishes with `Stop`.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::with_events([PresetEvent::MessageDelta(text.into())])
    }

    /// Overrides the finish reason.
    #[inline]
    pub fn with_finish_reason(mut self, reason: ModelFinishReason) -> Self {
        self.finish = PresetFinish::Reason(reason);
        self
    }

    /// Ends the response without any finish reason.
    #[inline]
    pub fn without_finish_reason(mut self) -> Self {
        self.finish = PresetFinish::Missing;
        self
    }

    pub(crate) fn finish_reason(&self) -> Option<ModelFinishReason> {
        match &self.finish {
            PresetFinish::Inferred => {
                let has_tool_call = self
                    .events
                    .iter()
                    .any(|event| matches!(event, PresetEvent::ToolCall(_)));
                Some(if has_tool_call {
                    ModelFinishReason::ToolCalls
                } else {
                    ModelFinishReason::Stop
                })
            }
            PresetFinish::Reason(reason) => Some(reason.clone()),
            PresetFinish::Missing => None,
        }
    }
}
