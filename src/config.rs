use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::{Error, Result};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".tarnim";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "tarnim.sqlite";
/// Corpus picked up on first run when the store is empty.
const CORPUS_FILE_NAME: &str = "song.json";

/// Overrides the database location.
pub const DB_ENV: &str = "TARNIM_DB";
/// Overrides the corpus location.
pub const CORPUS_ENV: &str = "TARNIM_CORPUS";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the store and the import corpus live.
pub struct Config {
    pub db_path: PathBuf,
    pub corpus_path: PathBuf,
}

impl Config {
    /// Both files inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            db_path: dir.join(DB_FILE_NAME),
            corpus_path: dir.join(CORPUS_FILE_NAME),
        }
    }

    /// Default locations under `~/.tarnim`, with `TARNIM_DB` and
    /// `TARNIM_CORPUS` taking precedence when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::in_dir(default_data_dir()?);
        if let Some(path) = env::var_os(DB_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(path) = env::var_os(CORPUS_ENV) {
            config.corpus_path = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Create the directory that will hold the database file.
    pub fn ensure_data_dir(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base_dirs =
        BaseDirs::new().ok_or_else(|| Error::DataDir("could not locate home directory".into()))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
