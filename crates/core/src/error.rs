use std::error::Error as StdError;
use std::fmt::{self, Display};

use playlist_agent_model::ModelProviderError;

use crate::tool;

/// Why an agent run stopped without a final answer.
#[derive(Debug)]
pub enum Error {
    /// The model request or its response stream failed.
    Model(Box<dyn ModelProviderError>),
    /// The response stream ended without a finish reason.
    MissingFinishReason,
    /// The model hit its output token limit.
    Length,
    /// The answer was withheld by the provider's content filter.
    ContentFilter,
    /// The model used the deprecated function-call protocol.
    FunctionCall,
    /// The model finished for a reason this loop does not handle.
    UnsupportedFinishReason(String),
    /// The model requested a tool that was never declared.
    UnknownTool(String),
    /// A tool call failed.
    Tool {
        /// The id of the failed call.
        id: String,
        /// The name of the failed tool.
        name: String,
        /// What went wrong.
        source: tool::Error,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Model(err) => write!(f, "model request failed: {err}"),
            Error::MissingFinishReason => {
                write!(f, "model response ended without a finish reason")
            }
            Error::Length => {
                write!(f, "model response was cut off by the token limit")
            }
            Error::ContentFilter => {
                write!(f, "model response was blocked by the content filter")
            }
            Error::FunctionCall => {
                write!(f, "deprecated function calls are not supported")
            }
            Error::UnsupportedFinishReason(reason) => {
                write!(f, "unsupported finish reason: {reason}")
            }
            Error::UnknownTool(name) => write!(f, "unknown tool: {name}"),
            Error::Tool { id, name, source } => {
                write!(f, "tool call {id} ({name}) failed: {source}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Model(err) => {
                let err: &(dyn StdError + 'static) = &**err;
                Some(err)
            }
            Error::Tool { source, .. } => Some(source),
            _ => None,
        }
    }
}
