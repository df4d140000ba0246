use playlist_agent_spotify::SpotifyClient;

/// The account whose playlists are read when none is configured.
pub const DEFAULT_USER_ID: &str = "firkinfedup";

/// Everything the playlist tools need to reach the catalog.
///
/// Built once at startup and shared by all tools.
#[derive(Debug)]
pub struct CatalogContext {
    client: SpotifyClient,
    user_id: String,
}

impl CatalogContext {
    /// Creates a context reading the playlists of `user_id`.
    #[inline]
    pub fn new<S: Into<String>>(client: SpotifyClient, user_id: S) -> Self {
        Self {
            client,
            user_id: user_id.into(),
        }
    }

    /// Returns the catalog client.
    #[inline]
    pub fn client(&self) -> &SpotifyClient {
        &self.client
    }

    /// Returns the account id.
    #[inline]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
