//! # Spotify Integration Module
//!
//! Client functions for the two Spotify services the downloader talks to:
//!
//! - [`auth`] - Authorization URL construction and the authorization-code
//!   token exchange against the accounts service
//! - [`library`] - Cursor-following fetchers for the user's saved tracks and
//!   followed artists on the Web API
//!
//! All functions take a shared [`reqwest::Client`] and the run's
//! [`crate::config::Settings`] so the endpoints can be pointed elsewhere.
//! Nothing is retried: any HTTP or decoding error is returned to the caller.

pub mod auth;
pub mod library;

/// Scopes requested from the user.
pub const SCOPE: &str = "user-library-read user-follow-read";
