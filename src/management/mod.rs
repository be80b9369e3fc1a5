mod export;

pub use export::ExportManager;
pub use export::LIKED_ARTISTS_FILE;
pub use export::LIKED_ARTISTS_SIMPLE_FILE;
pub use export::LIKED_SONGS_FILE;
pub use export::LIKED_SONGS_SIMPLE_FILE;
pub use export::artist_name;
pub use export::track_row;
