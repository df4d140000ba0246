//! Tool declarations and dispatch.
//!
//! A [`Tool`] is one callable capability with a typed input. A [`Toolbox`]
//! is the closed set of tools an agent offers: each tool is named by a
//! variant of [`Toolbox::Kind`], so a tool call naming anything else is
//! rejected when it is resolved rather than when it is dispatched.

mod error;

use playlist_agent_model::ModelTool;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use error::{Error, ErrorKind};

/// The result of a tool call.
pub type ToolResult = Result<String, Error>;

/// A tool that can be called by the model.
///
/// Any context the tool needs (clients, account ids) is handed to it when
/// it is constructed.
pub trait Tool: Send + Sync + 'static {
    /// The type of input that the tool accepts.
    type Input: DeserializeOwned;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the parameter schema of the tool, if it takes any.
    fn parameter_schema(&self) -> Option<&Value>;

    /// Executes the tool with the given input.
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static;

    /// Returns the declaration sent to the model.
    fn definition(&self) -> ModelTool {
        ModelTool {
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            parameters: self.parameter_schema().cloned(),
        }
    }
}

/// Decodes raw model arguments into `T::Input` and executes `tool`.
///
/// A `null` payload is read as an empty object, so tools without
/// parameters accept a call that carried no arguments at all.
pub async fn invoke<T: Tool>(tool: &T, arguments: Value) -> ToolResult {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        arguments => arguments,
    };
    let input: T::Input = serde_json::from_value(arguments).map_err(|err| {
        Error::invalid_input().with_reason(format!("{}: {err}", tool.name()))
    })?;
    tool.execute(input).await
}

/// Names the members of a closed set of tools.
pub trait ToolKind: Copy + Send + Sync + 'static {
    /// Every member, in the order they are declared to the model.
    const ALL: &'static [Self];

    /// The name the model uses for this tool.
    fn name(self) -> &'static str;

    /// Resolves a name requested by the model.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// A closed set of tools.
pub trait Toolbox: Send + Sync {
    /// The enumeration of tools in this set.
    type Kind: ToolKind;

    /// Returns the declaration of one tool.
    fn definition(&self, kind: Self::Kind) -> ModelTool;

    /// Runs one tool with raw model arguments.
    fn execute(
        &self,
        kind: Self::Kind,
        arguments: Value,
    ) -> impl Future<Output = ToolResult> + Send;

    /// Returns the declarations of every tool, in declaration order.
    fn definitions(&self) -> Vec<ModelTool> {
        Self::Kind::ALL
            .iter()
            .map(|kind| self.definition(*kind))
            .collect()
    }
}
