//! The tools offered to the model.

mod get_playlist;
mod list_playlists;

use std::sync::Arc;

use playlist_agent_core::tool::{
    Tool, ToolKind, ToolResult, Toolbox, invoke,
};
use playlist_agent_model::ModelTool;
use serde_json::Value;

use crate::context::CatalogContext;
pub use get_playlist::{GetPlaylistParameters, GetPlaylistTool};
pub use list_playlists::{ListPlaylistsParameters, ListPlaylistsTool};

/// Names the playlist tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaylistTool {
    /// [`ListPlaylistsTool`].
    ListPlaylists,
    /// [`GetPlaylistTool`].
    GetPlaylist,
}

impl ToolKind for PlaylistTool {
    const ALL: &'static [Self] =
        &[PlaylistTool::ListPlaylists, PlaylistTool::GetPlaylist];

    fn name(self) -> &'static str {
        match self {
            PlaylistTool::ListPlaylists => "list_playlists",
            PlaylistTool::GetPlaylist => "get_playlist",
        }
    }
}

/// Both playlist tools, sharing one [`CatalogContext`].
pub struct PlaylistToolbox {
    list_playlists: ListPlaylistsTool,
    get_playlist: GetPlaylistTool,
}

impl PlaylistToolbox {
    /// Creates the toolbox.
    pub fn new(context: Arc<CatalogContext>) -> Self {
        Self {
            list_playlists: ListPlaylistsTool::new(Arc::clone(&context)),
            get_playlist: GetPlaylistTool::new(context),
        }
    }
}

impl Toolbox for PlaylistToolbox {
    type Kind = PlaylistTool;

    fn definition(&self, kind: PlaylistTool) -> ModelTool {
        match kind {
            PlaylistTool::ListPlaylists => self.list_playlists.definition(),
            PlaylistTool::GetPlaylist => self.get_playlist.definition(),
        }
    }

    async fn execute(&self, kind: PlaylistTool, arguments: Value) -> ToolResult {
        match kind {
            PlaylistTool::ListPlaylists => {
                invoke(&self.list_playlists, arguments).await
            }
            PlaylistTool::GetPlaylist => {
                invoke(&self.get_playlist, arguments).await
            }
        }
    }
}
