mod builder;

use playlist_agent_model::{ModelFinishReason, ModelRequest, ToolCallRequest};
use tracing::Instrument;

use crate::conversation::Conversation;
use crate::error::Error;
use crate::model_client::{ModelClient, ModelTurn};
use crate::tool::{ToolKind, Toolbox};
pub use builder::AgentBuilder;

type ToolCallHook = Box<dyn Fn(&ToolCallRequest) + Send + Sync>;

/// Runs the tool-call loop: asks the model, dispatches the tools it
/// requests, and feeds the results back until it gives a final answer.
///
/// Every run starts a fresh conversation. Calls within one turn are
/// executed one after another, and their results are appended in the order
/// the model requested them.
pub struct Agent<B> {
    model_client: ModelClient,
    toolbox: B,
    on_tool_call: Option<ToolCallHook>,
}

impl<B: Toolbox> Agent<B> {
    /// Answers `input`, returning the whole conversation once the model
    /// stops.
    ///
    /// Any finish reason other than a stop or a tool-call request ends the
    /// run with an error, as does an unknown tool or a failing tool call.
    pub async fn run<S: Into<String>>(
        &self,
        input: S,
    ) -> Result<Conversation, Error> {
        let tools = self.toolbox.definitions();
        let mut conversation = Conversation::default();
        conversation.push_user(input.into());

        let mut turn_index = 0usize;
        loop {
            let req = ModelRequest {
                messages: conversation.messages(),
                tools: tools.clone(),
            };
            let ModelTurn {
                transcript,
                opaque_msg,
                tool_calls,
                finish_reason,
            } = self
                .model_client
                .send_request(req)
                .instrument(debug_span!("turn", index = turn_index))
                .await
                .map_err(Error::Model)?;
            turn_index += 1;

            let Some(finish_reason) = finish_reason else {
                return Err(Error::MissingFinishReason);
            };
            debug!("model finished with {finish_reason}");

            match finish_reason {
                ModelFinishReason::Stop => {
                    conversation.push_assistant(opaque_msg, transcript);
                    return Ok(conversation);
                }
                ModelFinishReason::ToolCalls => {
                    if tool_calls.is_empty() {
                        warn!("model asked for tool calls but sent none");
                    }
                    conversation.push_assistant(opaque_msg, transcript);
                    for call in tool_calls {
                        let content = self.dispatch(&call).await?;
                        conversation.push_tool_result(call.id, content);
                    }
                }
                ModelFinishReason::Length => return Err(Error::Length),
                ModelFinishReason::ContentFilter => {
                    return Err(Error::ContentFilter);
                }
                ModelFinishReason::FunctionCall => {
                    return Err(Error::FunctionCall);
                }
                ModelFinishReason::Other(reason) => {
                    return Err(Error::UnsupportedFinishReason(reason));
                }
            }
        }
    }

    async fn dispatch(&self, call: &ToolCallRequest) -> Result<String, Error> {
        let Some(kind) = B::Kind::from_name(&call.name) else {
            warn!("model requested an unknown tool: {}", call.name);
            return Err(Error::UnknownTool(call.name.clone()));
        };
        if let Some(on_tool_call) = &self.on_tool_call {
            on_tool_call(call);
        }

        let result = self
            .toolbox
            .execute(kind, call.arguments.clone())
            .instrument(debug_span!("tool", name = kind.name(), id = %call.id))
            .await;
        match result {
            Ok(content) => {
                trace!("tool {} returned {} bytes", call.name, content.len());
                Ok(content)
            }
            Err(source) => {
                error!("tool {} failed: {source}", call.name);
                Err(Error::Tool {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    source,
                })
            }
        }
    }
}

impl<B> Agent<B> {
    fn from_builder(builder: AgentBuilder<B>) -> Self {
        let AgentBuilder {
            model_client,
            toolbox,
            on_tool_call,
        } = builder;
        Self {
            model_client,
            toolbox,
            on_tool_call,
        }
    }
}
