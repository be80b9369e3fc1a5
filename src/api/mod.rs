//! # API Module
//!
//! HTTP handlers of the local listener that catches the OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization page.
//!   The first request carrying a `code` (or an `error`, when the user denied
//!   access) is forwarded to the waiting download flow through a oneshot
//!   channel and answered right away. Requests without either parameter get a
//!   `400`, duplicates a `409`.
//! - [`health`] - Reports status and version, handy to check the listener is
//!   up before opening the browser.
//!
//! The handlers are mounted by [`crate::server::CallbackServer`]; the
//! callback path comes from the configured redirect URI.

mod callback;
mod health;

pub use callback::CallbackSender;
pub use callback::callback;
pub use health::health;
