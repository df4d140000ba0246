//! The tool-call loop: conversation state, the model client and tool
//! dispatch.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod agent;
pub mod conversation;
mod error;
mod model_client;
pub mod tool;

pub use agent::{Agent, AgentBuilder};
pub use conversation::{Conversation, TranscriptSource};
pub use error::Error;
