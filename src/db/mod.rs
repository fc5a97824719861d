//! Persistence module split across logical submodules.

mod connection;
mod songs;

pub use connection::{ensure_schema, open_database, open_in_memory};
pub use songs::{
    clear_all_songs, count_songs, fetch_all_songs, fetch_song_by_id, fetch_songs_by_number,
    insert_song, replace_all_songs, search_songs_text,
};
