#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{self, post},
};
use serde_json::{Value, json};
use spotify_downloader::config::{
    ENV_API_URL, ENV_AUTH_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_REDIRECT_URI, ENV_TOKEN_URL,
    Settings,
};
use tokio::sync::Notify;

pub const ACCESS_TOKEN: &str = "test-access-token";

#[derive(Clone)]
struct MockState {
    base: String,
    token_calls: Arc<AtomicUsize>,
    api_calls: Arc<AtomicUsize>,
    tracks: Arc<Vec<Vec<Value>>>,
    artists: Arc<Vec<Vec<Value>>>,
    failing_track_page: Option<usize>,
    artists_gate: Option<Gate>,
}

/// Holds a handler until the test releases it.
///
/// `entered` is notified once the request has arrived, `release` lets it
/// answer.
#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

/// Local stand-in for the Spotify accounts service and Web API.
pub struct MockSpotify {
    pub base: String,
    pub token_calls: Arc<AtomicUsize>,
    pub api_calls: Arc<AtomicUsize>,
}

impl MockSpotify {
    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base)
    }
}

pub async fn start_mock(tracks: Vec<Vec<Value>>, artists: Vec<Vec<Value>>) -> MockSpotify {
    serve(tracks, artists, None, None).await
}

/// Same as [`start_mock`], but the track page at `failing_track_page`
/// answers with a 500.
pub async fn start_mock_with_failure(
    tracks: Vec<Vec<Value>>,
    artists: Vec<Vec<Value>>,
    failing_track_page: Option<usize>,
) -> MockSpotify {
    serve(tracks, artists, failing_track_page, None).await
}

/// Same as [`start_mock`], but every artists page waits on `gate`.
pub async fn start_mock_with_gate(
    tracks: Vec<Vec<Value>>,
    artists: Vec<Vec<Value>>,
    gate: Gate,
) -> MockSpotify {
    serve(tracks, artists, None, Some(gate)).await
}

async fn serve(
    tracks: Vec<Vec<Value>>,
    artists: Vec<Vec<Value>>,
    failing_track_page: Option<usize>,
    artists_gate: Option<Gate>,
) -> MockSpotify {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let state = MockState {
        base: base.clone(),
        token_calls: Arc::new(AtomicUsize::new(0)),
        api_calls: Arc::new(AtomicUsize::new(0)),
        tracks: Arc::new(tracks),
        artists: Arc::new(artists),
        failing_track_page,
        artists_gate,
    };
    let mock = MockSpotify {
        base,
        token_calls: Arc::clone(&state.token_calls),
        api_calls: Arc::clone(&state.api_calls),
    };

    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/me/tracks", routing::get(tracks_page))
        .route("/v1/me/following", routing::get(artists_page))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    mock
}

async fn token(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.token_calls.fetch_add(1, Ordering::SeqCst);

    let valid = form.get("grant_type").map(String::as_str) == Some("authorization_code")
        && form.get("code").map(String::as_str) == Some("valid-code")
        && form.get("client_id").map(String::as_str) == Some("client-id")
        && form.get("client_secret").map(String::as_str) == Some("client-secret")
        && form.contains_key("redirect_uri");

    if !valid {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "scope": "user-library-read user-follow-read",
            "expires_in": 3600,
            "refresh_token": "refresh"
        })),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {ACCESS_TOKEN}").as_str())
}

fn page_index(params: &HashMap<String, String>) -> usize {
    params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0)
}

fn next_url(base: &str, path: &str, page: usize, pages: usize) -> Value {
    if page + 1 < pages {
        json!(format!("{base}{path}&page={}", page + 1))
    } else {
        Value::Null
    }
}

async fn tracks_page(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        );
    }

    let page = page_index(&params);
    if state.failing_track_page == Some(page) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "server_error" })),
        );
    }

    let items = state.tracks.get(page).cloned().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "items": items,
            "next": next_url(&state.base, "/v1/me/tracks?limit=50", page, state.tracks.len()),
            "total": state.tracks.iter().map(Vec::len).sum::<usize>()
        })),
    )
}

async fn artists_page(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.api_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        );
    }
    if params.get("type").map(String::as_str) != Some("artist") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "bad type" })),
        );
    }
    if let Some(gate) = &state.artists_gate {
        gate.entered.notify_one();
        gate.release.notified().await;
    }

    let page = page_index(&params);
    let items = state.artists.get(page).cloned().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "artists": {
                "items": items,
                "next": next_url(
                    &state.base,
                    "/v1/me/following?type=artist&limit=50",
                    page,
                    state.artists.len()
                ),
                "total": state.artists.iter().map(Vec::len).sum::<usize>()
            }
        })),
    )
}

pub fn track(artist: &str, name: &str) -> Value {
    json!({
        "added_at": "2024-05-01T12:00:00Z",
        "track": {
            "id": format!("{name}-id"),
            "name": name,
            "artists": [{ "name": artist, "id": format!("{artist}-id") }]
        }
    })
}

pub fn artist(name: &str) -> Value {
    json!({ "id": format!("{name}-id"), "name": name, "genres": ["rock"] })
}

pub fn settings(mock_base: &str, redirect_uri: &str) -> Settings {
    let vars: HashMap<&str, String> = HashMap::from([
        (ENV_CLIENT_ID, "client-id".to_string()),
        (ENV_CLIENT_SECRET, "client-secret".to_string()),
        (ENV_REDIRECT_URI, redirect_uri.to_string()),
        (ENV_AUTH_URL, format!("{mock_base}/authorize")),
        (ENV_TOKEN_URL, format!("{mock_base}/api/token")),
        (ENV_API_URL, format!("{mock_base}/v1")),
    ]);
    Settings::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// GET with a short timeout, so a closed listener fails fast.
pub async fn try_get(url: &str) -> reqwest::Result<reqwest::Response> {
    let client = reqwest::Client::new();
    client.get(url).timeout(Duration::from_secs(2)).send().await
}

pub async fn get(url: &str) -> reqwest::Response {
    try_get(url).await.unwrap()
}
