use std::fmt::{self, Debug, Formatter};

const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Builder for [`SpotifyConfig`].
#[derive(Clone, PartialEq)]
pub struct SpotifyConfigBuilder {
    client_id: String,
    client_secret: String,
    api_base_url: Option<String>,
    accounts_url: Option<String>,
}

impl SpotifyConfigBuilder {
    /// Creates a builder with the application's client credentials.
    #[inline]
    pub fn with_credentials<I, S>(client_id: I, client_secret: S) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base_url: None,
            accounts_url: None,
        }
    }

    /// Sets the Web API base URL. Defaults to `https://api.spotify.com/v1`.
    #[inline]
    pub fn with_api_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Sets the accounts service URL, without the `/api/token` suffix.
    #[inline]
    pub fn with_accounts_url<S: Into<String>>(mut self, url: S) -> Self {
        self.accounts_url = Some(url.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SpotifyConfig {
        let api_base_url = self
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let accounts_url = self
            .accounts_url
            .unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_owned());
        SpotifyConfig {
            client_id: self.client_id,
            client_secret: self.client_secret,
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            accounts_url: accounts_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl Debug for SpotifyConfigBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfigBuilder")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("accounts_url", &self.accounts_url)
            .finish()
    }
}

/// Credentials and endpoints for the Spotify Web API.
#[derive(Clone, PartialEq)]
pub struct SpotifyConfig {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) api_base_url: String,
    pub(crate) accounts_url: String,
}

impl SpotifyConfig {
    /// Returns the Web API base URL.
    #[inline]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub(crate) fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url)
    }
}

impl Debug for SpotifyConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("accounts_url", &self.accounts_url)
            .finish()
    }
}
