use playlist_agent_model::{ModelProvider, ToolCallRequest};

use super::{Agent, ToolCallHook};
use crate::model_client::ModelClient;
use crate::tool::Toolbox;

/// [`Agent`] builder.
pub struct AgentBuilder<B = ()> {
    pub(crate) model_client: ModelClient,
    pub(crate) toolbox: B,
    pub(crate) on_tool_call: Option<ToolCallHook>,
}

impl AgentBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            toolbox: (),
            on_tool_call: None,
        }
    }
}

impl<B> AgentBuilder<B> {
    /// Sets the tools offered to the model.
    #[inline]
    pub fn with_toolbox<T: Toolbox>(self, toolbox: T) -> AgentBuilder<T> {
        AgentBuilder {
            model_client: self.model_client,
            toolbox,
            on_tool_call: self.on_tool_call,
        }
    }

    /// Attaches a callback invoked right before each tool call runs.
    #[inline]
    pub fn on_tool_call(
        mut self,
        on_tool_call: impl Fn(&ToolCallRequest) + Send + Sync + 'static,
    ) -> Self {
        self.on_tool_call = Some(Box::new(on_tool_call));
        self
    }
}

impl<B: Toolbox> AgentBuilder<B> {
    /// Builds the agent.
    #[inline]
    pub fn build(self) -> Agent<B> {
        Agent::from_builder(self)
    }
}
