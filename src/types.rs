use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Response body of the accounts service token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
}

/// What the browser delivered to the callback listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Code(String),
    Denied(String),
}

/// One page of `GET /me/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksPage {
    pub items: Vec<Value>,
    pub next: Option<String>,
}

/// One page of `GET /me/following?type=artist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Value>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

/// Everything fetched for a user, in API order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub tracks: Vec<Value>,
    pub artists: Vec<Value>,
}

/// Simplified projection of a saved track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub artist: String,
    pub track: String,
}

#[derive(Tabled)]
pub struct ExportTableRow {
    pub file: String,
    pub entries: String,
    pub path: String,
}
