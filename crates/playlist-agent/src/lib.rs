//! An agent that answers questions about a Spotify account's playlists.
//!
//! The crate provides the playlist tools and the context they share. It
//! also builds a CLI that poses one question and prints the conversation.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod context;
pub mod tools;

pub use context::{CatalogContext, DEFAULT_USER_ID};

/// Re-exports of [`playlist_agent_core`] crate.
pub mod core {
    pub use playlist_agent_core::*;
}
