use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use reqwest::Client;
use tabled::Table;

use crate::{
    Res,
    config::Settings,
    error, info,
    management::ExportManager,
    server::CallbackServer,
    spotify, success,
    types::{ExportTableRow, Library},
    warning,
};

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Directory receiving the output files, created if absent.
    pub directory: PathBuf,
    /// Launch the authorization URL in the default browser.
    pub open_browser: bool,
    /// Populate `liked_artists.json` with the artist records.
    pub full_artists: bool,
}

/// Runs the whole download and terminates the process on failure.
pub async fn download(settings: Settings, options: DownloadOptions) {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port));
    let server = match CallbackServer::bind(addr, &settings.callback_path()).await {
        Ok(server) => server,
        Err(e) => error!("Cannot listen on port {}: {}", settings.port, e),
    };

    match run(&settings, server, &options).await {
        Ok(rows) => {
            println!("{}", Table::new(rows));
            success!("Job complete. Terminating.");
        }
        Err(e) => error!("Download failed: {}", e),
    }
}

/// Authorizes, fetches the library and writes the output files.
///
/// Waits on `server` for the authorization code, then exchanges it, fetches
/// tracks and artists one after the other and exports them. The listener is
/// shut down before returning, whatever the outcome.
pub async fn run(
    settings: &Settings,
    mut server: CallbackServer,
    options: &DownloadOptions,
) -> Res<Vec<ExportTableRow>> {
    let exporter =
        ExportManager::new(options.directory.clone()).with_full_artists(options.full_artists);

    let res = authorize_and_export(settings, &mut server, options, &exporter).await;
    server.shutdown().await;
    res
}

async fn authorize_and_export(
    settings: &Settings,
    server: &mut CallbackServer,
    options: &DownloadOptions,
    exporter: &ExportManager,
) -> Res<Vec<ExportTableRow>> {
    exporter.prepare().await?;

    let auth_url = spotify::auth::authorize_url(settings)?;
    if !options.open_browser {
        info!("Open the following URL to authorize:\n{}", auth_url);
    } else if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
    }

    info!("Serving at port {}", server.local_addr().port());
    let code = server.wait_for_code().await?;

    let client = Client::new();
    let token = spotify::auth::exchange_code(&client, settings, &code).await?;
    success!("Successfully exchanged code for token.");

    let tracks = spotify::library::fetch_liked_tracks(&client, settings, &token).await?;
    success!("Successfully fetched {} liked tracks.", tracks.len());
    let artists = spotify::library::fetch_followed_artists(&client, settings, &token).await?;
    success!("Successfully fetched {} liked artists.", artists.len());

    let library = Library { tracks, artists };
    let rows = exporter.export(&library).await?;
    for row in &rows {
        success!("Successfully saved to {}", row.path);
    }
    Ok(rows)
}
