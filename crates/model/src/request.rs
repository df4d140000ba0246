use serde_json::Value;

use crate::OpaqueMessage;

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelRequest {
    /// The conversation so far, oldest first.
    pub messages: Vec<ModelMessage>,
    /// Tools the model may ask to call.
    pub tools: Vec<ModelTool>,
}

/// A complete message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// A plain assistant text.
    Assistant(String),
    /// A tool call result.
    Tool(ToolCallResult),
    /// A provider-specific message, usually an assistant turn that has to be
    /// replayed verbatim (for example one carrying tool calls).
    Opaque(OpaqueMessage),
}

/// The result of calling a tool.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToolCallResult {
    /// Identifier of the tool call request this result answers.
    pub id: String,
    /// The result text.
    pub content: String,
}

/// Declares a tool that the model may call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelTool {
    /// Name of the tool, as the model will refer to it.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: String,
    /// A [JSON schema](https://json-schema.org/) describing the arguments,
    /// or `None` for tools without arguments.
    pub parameters: Option<Value>,
}
