use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::models::{NewSong, Song};

const SONG_COLUMNS: &str = "s.id, s.number, s.title, s.lyrics, s.normalized_title, \
                            s.normalized_lyrics, s.key, s.category";

fn map_song(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        number: row.get(1)?,
        title: row.get(2)?,
        lyrics: row.get(3)?,
        normalized_title: row.get(4)?,
        normalized_lyrics: row.get(5)?,
        key: row.get(6)?,
        category: row.get(7)?,
    })
}

/// Insert one song and its index entry atomically, returning the stored row.
pub fn insert_song(conn: &mut Connection, song: NewSong) -> Result<Song> {
    let tx = conn.transaction()?;
    let stored = insert_song_row(&tx, song)?;
    tx.commit()?;
    Ok(stored)
}

/// Content row and index row for one song. Callers own the transaction.
fn insert_song_row(conn: &Connection, song: NewSong) -> Result<Song> {
    conn.execute(
        "INSERT INTO songs (number, title, lyrics, normalized_title, normalized_lyrics, key, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            song.number(),
            song.title(),
            song.lyrics(),
            song.normalized_title(),
            song.normalized_lyrics(),
            song.key(),
            song.category(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO songs_fts (rowid, normalized_title, normalized_lyrics) VALUES (?1, ?2, ?3)",
        params![id, song.normalized_title(), song.normalized_lyrics()],
    )?;

    Ok(song.into_song(id))
}

/// Drop the index first, then the content it points at. Callers own the
/// transaction.
fn clear_rows(conn: &Connection) -> Result<()> {
    conn.execute("INSERT INTO songs_fts (songs_fts) VALUES ('delete-all')", [])?;
    conn.execute("DELETE FROM songs", [])?;
    Ok(())
}

/// Remove every song and every index entry in one transaction.
pub fn clear_all_songs(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    clear_rows(&tx)?;
    tx.commit()?;
    Ok(())
}

/// Swap the whole corpus for `songs` in a single transaction. Readers on other
/// connections see either the old corpus or the new one, never an empty store.
pub fn replace_all_songs(conn: &mut Connection, songs: Vec<NewSong>) -> Result<usize> {
    let tx = conn.transaction()?;
    clear_rows(&tx)?;
    let mut inserted = 0;
    for song in songs {
        insert_song_row(&tx, song)?;
        inserted += 1;
    }
    tx.commit()?;
    Ok(inserted)
}

/// Number of stored songs. Start-up uses it to decide whether the corpus
/// still needs a first import.
pub fn count_songs(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Look a song up by row id. A missing row is `Ok(None)`.
pub fn fetch_song_by_id(conn: &Connection, id: i64) -> Result<Option<Song>> {
    let song = conn
        .query_row(
            &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.id = ?1"),
            [id],
            map_song,
        )
        .optional()?;
    Ok(song)
}

/// Every arrangement filed under `number`, first inserted first.
pub fn fetch_songs_by_number(conn: &Connection, number: i64) -> Result<Vec<Song>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SONG_COLUMNS} FROM songs s WHERE s.number = ?1 ORDER BY s.id"
    ))?;

    let songs = stmt
        .query_map([number], map_song)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(songs)
}

/// Full listing ordered by hymnal number, then insertion order.
pub fn fetch_all_songs(conn: &Connection) -> Result<Vec<Song>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SONG_COLUMNS} FROM songs s ORDER BY s.number, s.id"
    ))?;

    let songs = stmt
        .query_map([], map_song)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(songs)
}

/// Phrase search over the normalized title and lyrics. The query must already
/// be normalized and must appear as a contiguous sequence of tokens. Results
/// come back best match first, ties in insertion order.
pub fn search_songs_text(conn: &Connection, normalized_query: &str) -> Result<Vec<Song>> {
    // FTS5 reads NUL as the end of the query string.
    let cleaned = normalized_query.replace('\0', " ");
    if cleaned.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT {SONG_COLUMNS}
         FROM songs_fts
         INNER JOIN songs s ON s.id = songs_fts.rowid
         WHERE songs_fts MATCH ?1
         ORDER BY songs_fts.rank, s.id"
    ))?;

    let songs = stmt
        .query_map([phrase_query(&cleaned)], map_song)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(songs)
}

/// Quote the query as a single FTS5 phrase. Embedded quotes are doubled so
/// user input never reaches the query syntax.
fn phrase_query(normalized_query: &str) -> String {
    format!("\"{}\"", normalized_query.replace('"', "\"\""))
}
