//! Configuration management for the Spotify downloader.
//!
//! Values come from environment variables, which may be pre-populated from
//! `.env` files:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf};

use url::Url;

use crate::errors::Error;

pub const ENV_CLIENT_ID: &str = "SPOTIFY_DOWNLOADER_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_DOWNLOADER_CLIENT_SECRET";
pub const ENV_PORT: &str = "SPOTIFY_DOWNLOADER_PORT";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_DOWNLOADER_REDIRECT_URI";
pub const ENV_AUTH_URL: &str = "SPOTIFY_DOWNLOADER_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_DOWNLOADER_TOKEN_URL";
pub const ENV_API_URL: &str = "SPOTIFY_DOWNLOADER_API_URL";

pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from `.env` files.
///
/// The file in the current working directory is read first, then the one in
/// the platform-specific local data directory:
/// - Linux: `~/.local/share/spotify-downloader/.env`
/// - macOS: `~/Library/Application Support/spotify-downloader/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-downloader/.env`
///
/// Variables that are already set are never overridden. Missing files are not
/// an error.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    dotenv::dotenv().ok();

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-downloader/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Runtime settings of one download run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub port: u16,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from an arbitrary key lookup.
    ///
    /// Client id and secret are required and must not be empty. The redirect
    /// URI defaults to `http://localhost:<port>/callback`; when set explicitly
    /// it must not be empty and has to be an absolute URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(ENV_CLIENT_ID).unwrap_or_default();
        if client_id.is_empty() {
            return Err(Error::Config(format!(
                "Please provide a client id in the {ENV_CLIENT_ID} env variable."
            )));
        }

        let client_secret = lookup(ENV_CLIENT_SECRET).unwrap_or_default();
        if client_secret.is_empty() {
            return Err(Error::Config(format!(
                "Please provide a client secret in the {ENV_CLIENT_SECRET} env variable."
            )));
        }

        let port = match lookup(ENV_PORT) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let redirect_uri = match lookup(ENV_REDIRECT_URI) {
            Some(uri) => uri,
            None => format!("http://localhost:{port}/callback"),
        };
        if redirect_uri.is_empty() {
            return Err(Error::Config(format!(
                "Please provide a redirect uri in the {ENV_REDIRECT_URI} env variable or just keep it without value."
            )));
        }
        callback_route(&redirect_uri)?;

        Ok(Self {
            client_id,
            client_secret,
            port,
            redirect_uri,
            auth_url: lookup(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: lookup(ENV_TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }

    /// Path component of the redirect URI, the route the callback listener
    /// serves.
    pub fn callback_path(&self) -> String {
        callback_route(&self.redirect_uri).unwrap_or_else(|_| "/callback".to_string())
    }

    /// Base of the Web API without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

fn parse_port(raw: &str) -> Result<u16, Error> {
    match raw.trim().parse() {
        Ok(port) => Ok(port),
        Err(e) => {
            let msg = format!("Invalid port `{raw}` in {ENV_PORT}: {e}");
            Err(Error::Config(msg))
        }
    }
}

/// Extracts the listener route from a redirect URI.
///
/// # Errors
///
/// Fails when the URI does not parse or its path is not a literal route.
pub fn callback_route(redirect_uri: &str) -> Result<String, Error> {
    let url = Url::parse(redirect_uri).map_err(|e| invalid_redirect(redirect_uri, e))?;
    if is_literal_route(url.path()) {
        Ok(url.path().to_string())
    } else {
        Err(invalid_redirect(redirect_uri, "path must be literal"))
    }
}

/// Whether the router matches `path` as written.
///
/// Segments starting with `:` or `*` or containing braces would be read as
/// captures or wildcards.
pub fn is_literal_route(path: &str) -> bool {
    path.starts_with('/') && path.split('/').all(is_literal_segment)
}

fn is_literal_segment(segment: &str) -> bool {
    !segment.starts_with([':', '*']) && !segment.contains(['{', '}'])
}

fn invalid_redirect(uri: &str, reason: impl fmt::Display) -> Error {
    Error::Config(format!("Invalid {ENV_REDIRECT_URI} `{uri}`: {reason}"))
}
