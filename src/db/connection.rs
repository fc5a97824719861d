use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

/// Open (creating if needed) the song database at `path` and make sure the
/// schema exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    log::info!("opened song database at {}", path.display());
    Ok(conn)
}

/// Fresh database that lives only as long as the connection. Handy for tests
/// and one-off tooling.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the content table, the number index and the full-text index. Every
/// statement is idempotent so this runs on each start-up.
///
/// `songs_fts` is an external-content FTS5 table: it stores only the token
/// index and reads column values back from `songs` by `id`. The store keeps
/// both in step inside transactions, see `db::songs`.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            number INTEGER NOT NULL,
            title TEXT NOT NULL,
            lyrics TEXT NOT NULL,
            normalized_title TEXT NOT NULL,
            normalized_lyrics TEXT NOT NULL,
            key TEXT,
            category TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_songs_number ON songs(number)",
        [],
    )?;

    conn.execute(
        "CREATE VIRTUAL TABLE IF NOT EXISTS songs_fts USING fts5(
            normalized_title,
            normalized_lyrics,
            content='songs',
            content_rowid='id'
        )",
        [],
    )?;

    Ok(())
}
