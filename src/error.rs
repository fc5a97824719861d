//! Error type shared by the library layers. Lookups that find nothing are not
//! errors: they come back as `None` or an empty `Vec`, so every variant here
//! means the operation itself could not complete.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the song store, the importer and configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A corpus entry could not be turned into a song. The import is aborted
    /// before anything is written.
    #[error("invalid song entry at position {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// The embedded SQLite database failed (I/O, corruption, bad schema).
    #[error("song storage failed: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("corpus file not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable location for the application data.
    #[error("could not resolve data directory: {0}")]
    DataDir(String),
}

pub type Result<T> = std::result::Result<T, Error>;
