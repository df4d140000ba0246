use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::SpotifyConfig;
use crate::error::{Error, ErrorKind};
use crate::model::{FullPlaylist, Page, SimplifiedPlaylist};
use crate::paging::collect_pages;

const PLAYLIST_PAGE_SIZE: &str = "50";

/// An authorized Web API client.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    config: Arc<SpotifyConfig>,
    access_token: String,
}

impl SpotifyClient {
    /// Creates a client that sends `access_token` with every request.
    #[inline]
    pub fn with_access_token<S: Into<String>>(
        config: SpotifyConfig,
        access_token: S,
    ) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
            access_token: access_token.into(),
        }
    }

    /// Returns every playlist of `user_id`, or `None` if the first page of
    /// the listing is empty.
    pub async fn user_playlists(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<SimplifiedPlaylist>>, Error> {
        let url = format!("{}/users/{user_id}/playlists", self.config.api_base_url);
        let first: Page<SimplifiedPlaylist> =
            self.get(url, &[("limit", PLAYLIST_PAGE_SIZE)]).await?;
        debug!(
            "user {user_id} has {} playlists, got {} on the first page",
            first.total,
            first.items.len()
        );
        collect_pages(first, |url| self.get(url, &[])).await
    }

    /// Returns the playlist `id` with every page of its tracks.
    pub async fn playlist(&self, id: &str) -> Result<FullPlaylist, Error> {
        let url = format!("{}/playlists/{id}", self.config.api_base_url);
        let mut playlist: FullPlaylist = self.get(url, &[]).await?;

        let first = Page {
            items: std::mem::take(&mut playlist.tracks.items),
            total: playlist.tracks.total,
            next: playlist.tracks.next.take(),
            limit: playlist.tracks.limit,
            offset: playlist.tracks.offset,
        };
        let items = collect_pages(first, |url| self.get(url, &[]))
            .await?
            .unwrap_or_default();
        debug!("playlist {id} has {} items", items.len());
        playlist.tracks.items = items;
        playlist.tracks.offset = 0;
        Ok(playlist)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        trace!("GET {url}");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            warn!("GET {url} failed with status {status}");
            return Err(Error::new(
                format!("unexpected response from {url}: {body}"),
                ErrorKind::Status(status.as_u16()),
            ));
        }
        serde_json::from_str(&body).map_err(|err| {
            error!("cannot decode response from {url}: {err}");
            Error::from(err)
        })
    }
}

impl Debug for SpotifyClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyClient")
            .field("config", &self.config)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
