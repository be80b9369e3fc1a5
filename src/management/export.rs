use std::path::PathBuf;

use csv::{Terminator, WriterBuilder};
use serde_json::Value;

use crate::{
    Res,
    errors::Error,
    types::{ExportTableRow, Library, TrackRow},
    utils,
};

pub const LIKED_SONGS_FILE: &str = "liked_songs.json";
pub const LIKED_ARTISTS_FILE: &str = "liked_artists.json";
pub const LIKED_SONGS_SIMPLE_FILE: &str = "liked_songs_simple.csv";
pub const LIKED_ARTISTS_SIMPLE_FILE: &str = "liked_artists_simple.csv";

/// Projects a saved-track item onto its first artist and its title.
pub fn track_row(item: &Value, index: usize) -> Res<TrackRow> {
    let artist = item
        .pointer("/track/artists/0/name")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField {
            field: "track.artists[0].name",
            index,
        })?;
    let track = item
        .pointer("/track/name")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField {
            field: "track.name",
            index,
        })?;

    Ok(TrackRow {
        artist: artist.to_string(),
        track: track.to_string(),
    })
}

/// Projects an artist item onto its name.
pub fn artist_name(item: &Value, index: usize) -> Res<&str> {
    item.get("name")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField {
            field: "name",
            index,
        })
}

/// Writes the downloaded library into an output directory.
///
/// Every file is rendered in memory first and then written in one go,
/// replacing whatever was there before.
pub struct ExportManager {
    dir: PathBuf,
    full_artists: bool,
}

impl ExportManager {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            full_artists: false,
        }
    }

    /// Also dump the artist records into `liked_artists.json`, which is
    /// otherwise left empty.
    pub fn with_full_artists(mut self, full_artists: bool) -> Self {
        self.full_artists = full_artists;
        self
    }

    /// Creates the output directory and its parents.
    pub async fn prepare(&self) -> Res<()> {
        async_fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub async fn write_tracks_json(&self, tracks: &[Value]) -> Res<PathBuf> {
        self.write(LIKED_SONGS_FILE, utils::to_pretty_json(tracks)?).await
    }

    pub async fn write_artists_json(&self, artists: &[Value]) -> Res<PathBuf> {
        let contents = if self.full_artists {
            utils::to_pretty_json(artists)?
        } else {
            Vec::new()
        };
        self.write(LIKED_ARTISTS_FILE, contents).await
    }

    pub async fn write_tracks_csv(&self, tracks: &[Value]) -> Res<PathBuf> {
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());
        wtr.write_record(["Artist", "Track"])?;
        for (index, item) in tracks.iter().enumerate() {
            let row = track_row(item, index)?;
            wtr.write_record([row.artist.as_str(), row.track.as_str()])?;
        }
        let contents = wtr.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        self.write(LIKED_SONGS_SIMPLE_FILE, contents).await
    }

    pub async fn write_artists_csv(&self, artists: &[Value]) -> Res<PathBuf> {
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());
        for (index, item) in artists.iter().enumerate() {
            wtr.write_record([artist_name(item, index)?])?;
        }
        let contents = wtr.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        self.write(LIKED_ARTISTS_SIMPLE_FILE, contents).await
    }

    /// Writes all four output files and returns one summary row per file.
    ///
    /// Files are written in a fixed order; a failure leaves the files written
    /// before it in place.
    pub async fn export(&self, library: &Library) -> Res<Vec<ExportTableRow>> {
        let artists_json_entries = if self.full_artists {
            library.artists.len()
        } else {
            0
        };

        let written = [
            (
                self.write_tracks_json(&library.tracks).await?,
                library.tracks.len(),
            ),
            (
                self.write_artists_json(&library.artists).await?,
                artists_json_entries,
            ),
            (
                self.write_tracks_csv(&library.tracks).await?,
                library.tracks.len(),
            ),
            (
                self.write_artists_csv(&library.artists).await?,
                library.artists.len(),
            ),
        ];

        Ok(written
            .into_iter()
            .map(|(path, entries)| ExportTableRow {
                file: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                entries: entries.to_string(),
                path: path.display().to_string(),
            })
            .collect())
    }

    async fn write(&self, file_name: &str, contents: Vec<u8>) -> Res<PathBuf> {
        let path = self.dir.join(file_name);
        async_fs::write(&path, contents).await?;
        let path = async_fs::canonicalize(&path).await.unwrap_or(path);
        Ok(path)
    }
}
