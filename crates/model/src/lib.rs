//! Provider-neutral types for talking to chat-completion models.
//!
//! The agent loop only ever sees the types in this crate: a request made of
//! conversation messages and tool declarations, and a response that yields
//! text deltas, tool call requests and a finish reason. Concrete providers
//! (the OpenAI-compatible one, the scripted test model) translate these to
//! and from their own wire formats.
//!
//! Nothing here performs I/O.

#![deny(missing_docs)]

mod error;
mod opaque;
mod provider;
mod request;
mod response;

pub use error::*;
pub use opaque::*;
pub use provider::*;
pub use request::*;
pub use response::*;
