//! Query resolution: decide whether the user typed a hymn number, some text,
//! or nothing, and dispatch to the matching store lookup.

use rusqlite::Connection;

use crate::db::{fetch_all_songs, fetch_songs_by_number, search_songs_text};
use crate::error::Result;
use crate::models::Song;
use crate::normalize::{first_number, is_numeric_only, normalize};

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a raw query will be answered.
pub enum Query {
    /// Blank input: list everything.
    All,
    /// Digits only: exact hymn number lookup.
    Number(i64),
    /// Anything else, already normalized. May be empty if the input was made
    /// of characters normalization removes.
    Text(String),
}

/// Classify a raw query string.
///
/// A digits-only query too large for `i64` is treated as text.
pub fn classify_query(raw: &str) -> Query {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Query::All;
    }

    if is_numeric_only(trimmed) {
        if let Ok(number) = trimmed.parse::<i64>() {
            return Query::Number(number);
        }
    }

    Query::Text(normalize(trimmed))
}

/// Resolve `raw` against the store.
///
/// Text queries are phrase-matched; when that finds nothing and the input has
/// an embedded digit run ("ترنيمة 42"), the first run is retried as a hymn
/// number. An empty result is a normal outcome, not an error.
pub fn resolve_query(conn: &Connection, raw: &str) -> Result<Vec<Song>> {
    let query = classify_query(raw);
    log::debug!("resolving {raw:?} as {query:?}");

    match query {
        Query::All => fetch_all_songs(conn),
        Query::Number(number) => fetch_songs_by_number(conn, number),
        Query::Text(normalized) if normalized.is_empty() => Ok(Vec::new()),
        Query::Text(normalized) => {
            let songs = search_songs_text(conn, &normalized)?;
            if !songs.is_empty() {
                return Ok(songs);
            }

            match first_number(raw) {
                Some(number) => {
                    log::debug!("no text hits for {raw:?}, falling back to number {number}");
                    fetch_songs_by_number(conn, number)
                }
                None => Ok(songs),
            }
        }
    }
}
