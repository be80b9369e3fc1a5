use reqwest::Client;
use url::Url;

use crate::{Res, config::Settings, spotify::SCOPE, types::TokenResponse};

/// Builds the URL the user opens to grant the application access.
///
/// All parameters are URL-encoded, the scope is fixed to
/// `user-library-read user-follow-read`.
///
/// # Example
///
/// ```
/// let url = authorize_url(&settings)?;
/// webbrowser::open(url.as_str())?;
/// ```
pub fn authorize_url(settings: &Settings) -> Res<Url> {
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("scope", SCOPE),
        ],
    )?;
    Ok(url)
}

/// Exchanges an authorization code for an access token.
///
/// Sends the client credentials in the form body together with the code and
/// the redirect URI used for the authorization request.
///
/// # Errors
///
/// Fails on network errors, a non-2xx status, or a body without an
/// `access_token` field.
pub async fn exchange_code(client: &Client, settings: &Settings, code: &str) -> Res<String> {
    let res = client
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("client_id", settings.client_id.as_str()),
            ("client_secret", settings.client_secret.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let token = res.json::<TokenResponse>().await?;
    Ok(token.access_token)
}
