use std::sync::Arc;

use playlist_agent_core::tool::{Error as ToolError, Tool, ToolResult};
use playlist_agent_spotify::model::{FullTrack, PlayableItem, PlaylistItem};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

use crate::context::CatalogContext;

const UNKNOWN_ARTIST: &str = "Unknown artist";
const UNKNOWN_SHOW: &str = "Unknown show";

/// Arguments of [`GetPlaylistTool`].
#[derive(Deserialize, JsonSchema)]
pub struct GetPlaylistParameters {
    #[schemars(description = "Unique Id of the playlist to get.")]
    id: String,
}

/// A tool that lists every track of one playlist.
pub struct GetPlaylistTool {
    context: Arc<CatalogContext>,
    parameter_schema: Value,
}

impl GetPlaylistTool {
    /// Creates a new get playlist tool.
    #[inline]
    pub fn new(context: Arc<CatalogContext>) -> Self {
        Self {
            context,
            parameter_schema: schema_for!(GetPlaylistParameters).to_value(),
        }
    }
}

impl Tool for GetPlaylistTool {
    type Input = GetPlaylistParameters;

    fn name(&self) -> &str {
        "get_playlist"
    }

    fn description(&self) -> &str {
        "Get a Spotify playlist and all of its tracks."
    }

    fn parameter_schema(&self) -> Option<&Value> {
        Some(&self.parameter_schema)
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: GetPlaylistParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let context = Arc::clone(&self.context);
        async move {
            let playlist =
                context.client().playlist(&input.id).await.map_err(|err| {
                    ToolError::execution_error().with_reason(err.to_string())
                })?;
            debug!(
                "rendering {} items of {}",
                playlist.tracks.items.len(),
                playlist.name
            );
            Ok(render_items(&playlist.tracks.items))
        }
    }
}

fn render_items(items: &[PlaylistItem]) -> String {
    let mut lines = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match &item.track {
            Some(playable) => lines.push(render_playable(playable)),
            None => debug!("skipping unavailable item at {index}"),
        }
    }
    lines.join("\n")
}

fn render_playable(playable: &PlayableItem) -> String {
    match playable {
        PlayableItem::Track(track) | PlayableItem::LocalTrack(track) => {
            format!("{} - {}", first_artist(track), track.name)
        }
        PlayableItem::Episode(episode) => {
            let show = episode
                .show
                .as_ref()
                .map_or(UNKNOWN_SHOW, |show| show.name.as_str());
            format!("{show} - {}", episode.name)
        }
    }
}

fn first_artist(track: &FullTrack) -> &str {
    track
        .artists
        .first()
        .map_or(UNKNOWN_ARTIST, |artist| artist.name.as_str())
}
