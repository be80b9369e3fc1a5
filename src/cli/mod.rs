//! # CLI Module
//!
//! Command-line flow of the downloader:
//!
//! ```text
//! open authorization URL  →  wait for callback  →  exchange code
//!        →  fetch tracks  →  fetch artists  →  write files  →  stop listener
//! ```
//!
//! [`download`] is what the binary calls; it prints progress with the crate's
//! status macros and exits the process on any failure. [`run`] is the same
//! flow returning a result, for callers that bring their own listener.
//!
//! ## Usage
//!
//! ```bash
//! spotify-downloader ~/backups/spotify
//! spotify-downloader ~/backups/spotify --no-browser --full-artists
//! ```

mod download;

pub use download::DownloadOptions;
pub use download::download;
pub use download::run;
