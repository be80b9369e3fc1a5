//! Spotify Downloader Library
//!
//! Downloads the saved tracks and followed artists of a Spotify user. The
//! user authorizes the application in the browser, a short-lived local HTTP
//! listener catches the OAuth redirect, and the code is exchanged for an
//! access token that is used to page through the library endpoints. The
//! results are written to disk as JSON dumps and simplified CSV tables.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the local callback listener
//! - `cli` - Command-line flow tying authorization, fetching and export together
//! - `config` - Environment loading and runtime settings
//! - `errors` - Crate error type
//! - `management` - Output file export
//! - `server` - Local HTTP listener for the OAuth callback
//! - `spotify` - Spotify accounts and Web API client functions
//! - `types` - Data structures and type definitions
//! - `utils` - Small helpers shared across modules

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias used throughout the crate.
///
/// # Example
///
/// ```
/// use spotify_downloader::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, errors::Error>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Serving at port {}", port);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Successfully saved to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program
/// with status 1.
///
/// Only meant for fatal errors; code after this macro does not run.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser, open this URL manually:\n{}", url);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
