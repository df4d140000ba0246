//! Response objects of the Web API, limited to the fields the tools read.

use serde::Deserialize;

/// One page of a paginated listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
    /// The entries on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// The number of entries across all pages.
    pub total: u32,
    /// Absolute URL of the next page, if any.
    pub next: Option<String>,
    /// Requested page size.
    #[serde(default)]
    pub limit: u32,
    /// Index of the first entry on this page.
    #[serde(default)]
    pub offset: u32,
}

/// A playlist as it appears in a listing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SimplifiedPlaylist {
    /// Spotify id.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A playlist with its track listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FullPlaylist {
    /// Spotify id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The playlist's entries.
    pub tracks: Page<PlaylistItem>,
}

/// An entry of a playlist.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlaylistItem {
    /// `None` when the entry is no longer available.
    #[serde(default)]
    pub track: Option<PlayableItem>,
}

/// Something that can sit in a playlist.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "TaggedItem")]
pub enum PlayableItem {
    /// A catalog track.
    Track(FullTrack),
    /// A file the owner added from their own device.
    LocalTrack(FullTrack),
    /// A podcast episode.
    Episode(FullEpisode),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedItem {
    Track(FullTrack),
    Episode(FullEpisode),
}

impl From<TaggedItem> for PlayableItem {
    fn from(item: TaggedItem) -> Self {
        match item {
            TaggedItem::Track(track) if track.is_local => {
                PlayableItem::LocalTrack(track)
            }
            TaggedItem::Track(track) => PlayableItem::Track(track),
            TaggedItem::Episode(episode) => PlayableItem::Episode(episode),
        }
    }
}

/// A track.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FullTrack {
    /// Spotify id. Local tracks have none.
    #[serde(default)]
    pub id: Option<String>,
    /// Track title.
    pub name: String,
    /// Performing artists, main artist first.
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    /// Whether this is a local file.
    #[serde(default)]
    pub is_local: bool,
}

/// An artist credited on a track.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SimplifiedArtist {
    /// Artist name.
    pub name: String,
}

/// A podcast episode.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FullEpisode {
    /// Spotify id.
    #[serde(default)]
    pub id: Option<String>,
    /// Episode title.
    pub name: String,
    /// The show this episode belongs to.
    #[serde(default)]
    pub show: Option<SimplifiedShow>,
}

/// A podcast show.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SimplifiedShow {
    /// Show name.
    pub name: String,
}

/// Response of the client-credentials token exchange.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// The bearer token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
