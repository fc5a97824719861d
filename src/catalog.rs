//! The surface other parts of the application talk to. `Catalog` owns the
//! SQLite connection; everything it hands out is an owned copy, so callers
//! never mutate stored songs.

use std::path::Path;

use rusqlite::Connection;

use crate::db::{count_songs, fetch_all_songs, fetch_song_by_id, open_database, open_in_memory};
use crate::error::Result;
use crate::import::{import_corpus, import_from_file};
use crate::models::{RawSongEntry, SearchResult, Song};
use crate::search::resolve_query;
use crate::snippet::annotate;

/// Search, lookup and import over one song database.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open the database file at `path`, creating the file and schema on first
    /// use. The caller makes sure the parent directory exists.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_connection(open_database(path)?))
    }

    /// Catalog backed by a throwaway in-memory database. Handy for tests and
    /// one-off tooling.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_connection(open_in_memory()?))
    }

    /// Wrap a connection whose schema is already in place.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Songs matching `query`: a hymn number, some text, or blank for all.
    pub fn search(&self, query: &str) -> Result<Vec<Song>> {
        resolve_query(&self.conn, query)
    }

    /// Like [`Catalog::search`] with the line to highlight for each song.
    pub fn search_with_snippets(&self, query: &str) -> Result<Vec<SearchResult>> {
        let songs = self.search(query)?;
        Ok(annotate(songs, query))
    }

    /// Every song ordered by hymnal number, then insertion order. This is the
    /// same listing a blank search returns.
    pub fn all_songs(&self) -> Result<Vec<Song>> {
        fetch_all_songs(&self.conn)
    }

    /// `None` for ids that no longer exist, e.g. a history entry that outlived
    /// a re-import.
    pub fn song_by_id(&self, id: i64) -> Result<Option<Song>> {
        fetch_song_by_id(&self.conn, id)
    }

    /// Number of stored songs.
    pub fn song_count(&self) -> Result<usize> {
        count_songs(&self.conn)
    }

    /// True before the first import. Start-up uses it to pick up `song.json`.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.song_count()? == 0)
    }

    /// Replace the corpus with `entries`, see [`crate::import::import_corpus`].
    pub fn import_corpus(&mut self, entries: &[RawSongEntry]) -> Result<usize> {
        import_corpus(&mut self.conn, entries)
    }

    /// Read a JSON corpus from `path` and replace the stored songs with it.
    /// A missing file, malformed JSON or a bad entry leaves the store as it was.
    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        import_from_file(&mut self.conn, path)
    }
}
