//! A small client for the parts of the Spotify Web API that read playlists.
//!
//! Start with [`request_access_token`] to exchange the application's
//! credentials for a bearer token, then build a [`SpotifyClient`] with it.

#[macro_use]
extern crate tracing;

mod auth;
mod client;
mod config;
mod error;
pub mod model;
mod paging;

pub use auth::request_access_token;
pub use client::SpotifyClient;
pub use config::{SpotifyConfig, SpotifyConfigBuilder};
pub use error::{Error, ErrorKind};
