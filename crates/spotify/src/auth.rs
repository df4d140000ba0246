use reqwest::Client;

use crate::config::SpotifyConfig;
use crate::error::Error;
use crate::model::AccessToken;

/// Exchanges the configured client credentials for a bearer token.
///
/// Returns `Ok(None)` when the accounts service rejects the exchange with a
/// non-success status.
pub async fn request_access_token(
    config: &SpotifyConfig,
) -> Result<Option<String>, Error> {
    let client = Client::new();
    let resp = client
        .post(config.token_url())
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!("token exchange failed with status {status}: {body}");
        return Ok(None);
    }

    let body = resp.text().await?;
    let token: AccessToken = serde_json::from_str(&body)?;
    debug!(
        "got a {} token valid for {}s",
        token.token_type, token.expires_in
    );
    Ok(Some(token.access_token))
}
