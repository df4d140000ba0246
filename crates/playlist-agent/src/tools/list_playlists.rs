use std::sync::Arc;

use playlist_agent_core::tool::{Error as ToolError, Tool, ToolResult};
use playlist_agent_spotify::model::SimplifiedPlaylist;
use serde::Deserialize;
use serde_json::Value;

use crate::context::CatalogContext;

/// [`ListPlaylistsTool`] takes no arguments.
#[derive(Deserialize)]
pub struct ListPlaylistsParameters {}

/// A tool that lists every playlist of the configured account.
pub struct ListPlaylistsTool {
    context: Arc<CatalogContext>,
}

impl ListPlaylistsTool {
    /// Creates a new list playlists tool.
    #[inline]
    pub fn new(context: Arc<CatalogContext>) -> Self {
        Self { context }
    }
}

impl Tool for ListPlaylistsTool {
    type Input = ListPlaylistsParameters;

    fn name(&self) -> &str {
        "list_playlists"
    }

    fn description(&self) -> &str {
        "Get all my Spotify playlists. This will return all playlists \
         belonging to the current user, but will not get all of the tracks \
         for each playlist."
    }

    fn parameter_schema(&self) -> Option<&Value> {
        None
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        _input: ListPlaylistsParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let context = Arc::clone(&self.context);
        async move {
            let user_id = context.user_id();
            let listing = context
                .client()
                .user_playlists(user_id)
                .await
                .map_err(|err| {
                    ToolError::execution_error().with_reason(err.to_string())
                })?;
            Ok(render_listing(user_id, listing))
        }
    }
}

fn render_listing(
    user_id: &str,
    listing: Option<Vec<SimplifiedPlaylist>>,
) -> String {
    let Some(playlists) = listing else {
        warn!("no playlists found for {user_id}");
        return String::new();
    };
    playlists
        .iter()
        .map(|playlist| format!("{} ({})", playlist.name, playlist.id))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: &str, name: &str) -> SimplifiedPlaylist {
        SimplifiedPlaylist {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }

    #[test]
    fn test_render_listing() {
        let listing = vec![
            playlist("3cEYpjA9oz9GiPac4AsH4n", "Siren Sessions 01"),
            playlist("7xBqe0C8wJbOgWzS9iVj1h", "Best of Siren Sessions"),
        ];
        assert_eq!(
            render_listing("firkinfedup", Some(listing)),
            "Siren Sessions 01 (3cEYpjA9oz9GiPac4AsH4n)\n\
             Best of Siren Sessions (7xBqe0C8wJbOgWzS9iVj1h)"
        );
    }

    #[test]
    fn test_render_missing_listing() {
        assert_eq!(render_listing("firkinfedup", None), "");
    }
}
