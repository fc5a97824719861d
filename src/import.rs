//! Bulk import of the hymn corpus. Entries are validated up front and the
//! store is replaced in one transaction, so a bad entry leaves the previous
//! corpus intact.

use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::db::replace_all_songs;
use crate::error::{Error, Result};
use crate::models::{NewSong, RawNumber, RawSongEntry};

/// Parse the JSON array found in `song.json`.
pub fn parse_corpus(json: &str) -> Result<Vec<RawSongEntry>> {
    Ok(serde_json::from_str(json)?)
}

fn parse_number(index: usize, number: Option<&RawNumber>) -> Result<i64> {
    match number {
        Some(RawNumber::Integer(value)) => Ok(*value),
        Some(RawNumber::Text(text)) => {
            text.trim().parse().map_err(|_| Error::InvalidEntry {
                index,
                reason: format!("song number {text:?} is not an integer"),
            })
        }
        None => Err(Error::InvalidEntry {
            index,
            reason: "missing song number".to_string(),
        }),
    }
}

/// Turn raw entries into normalized songs, failing on the first entry whose
/// number cannot be parsed.
pub fn prepare_entries(entries: &[RawSongEntry]) -> Result<Vec<NewSong>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<NewSong> {
            let number = parse_number(index, entry.number.as_ref())?;
            Ok(NewSong::new(
                number,
                entry.title.clone().unwrap_or_default(),
                entry.lyrics.clone().unwrap_or_default(),
            ))
        })
        .collect()
}

/// Replace the stored corpus with `entries` and return how many songs were
/// written. An empty slice is a no-op that returns 0.
pub fn import_corpus(conn: &mut Connection, entries: &[RawSongEntry]) -> Result<usize> {
    if entries.is_empty() {
        log::warn!("corpus is empty, keeping existing songs");
        return Ok(0);
    }

    let songs = prepare_entries(entries)?;
    log::info!("importing {} songs", songs.len());
    let count = replace_all_songs(conn, songs)?;
    log::info!("imported {count} songs");
    Ok(count)
}

/// Read a JSON corpus from disk and import it.
pub fn import_from_file(conn: &mut Connection, path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::CorpusNotFound(path.to_path_buf()));
    }

    let json = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_corpus(&json)?;
    import_corpus(conn, &entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{count_songs, fetch_all_songs, insert_song, open_in_memory};

    const CORPUS: &str = r#"[
        {"song_number": "1", "song_title": "تَرنيمة", "song_lyrics": "سطر\nسطر ثانٍ"},
        {"song_number": " 2 ", "song_title": "ثانية"},
        {"song_number": 3, "song_lyrics": "بلا عنوان"}
    ]"#;

    #[test]
    fn test_parse_corpus_accepts_text_and_integer_numbers() {
        let entries = parse_corpus(CORPUS).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].number, Some(RawNumber::Text("1".to_string())));
        assert_eq!(entries[2].number, Some(RawNumber::Integer(3)));
        assert_eq!(entries[1].lyrics, None);
    }

    #[test]
    fn test_parse_corpus_rejects_malformed_json() {
        assert!(matches!(parse_corpus("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_import_normalizes_and_counts() {
        let mut conn = open_in_memory().unwrap();
        let entries = parse_corpus(CORPUS).unwrap();
        assert_eq!(import_corpus(&mut conn, &entries).unwrap(), 3);

        let songs = fetch_all_songs(&conn).unwrap();
        assert_eq!(songs[0].title, "تَرنيمة");
        assert_eq!(songs[0].normalized_title, "ترنيمه");
        assert_eq!(songs[1].number, 2);
        assert_eq!(songs[1].lyrics, "");
        assert_eq!(songs[2].title, "");
        assert!(songs.iter().all(|s| s.key.is_none() && s.category.is_none()));
    }

    #[test]
    fn test_invalid_number_aborts_without_touching_store() {
        let mut conn = open_in_memory().unwrap();
        insert_song(&mut conn, NewSong::new(99, "قديم", "قديم")).unwrap();

        let entries = vec![
            RawSongEntry::new("1", "a", "a"),
            RawSongEntry::new("twelve", "b", "b"),
        ];
        let err = import_corpus(&mut conn, &entries).unwrap_err();
        match err {
            Error::InvalidEntry { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("twelve"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(count_songs(&conn).unwrap(), 1);
    }

    #[test]
    fn test_missing_number_is_invalid() {
        let entries = vec![RawSongEntry {
            title: Some("x".to_string()),
            ..RawSongEntry::default()
        }];
        assert!(matches!(
            prepare_entries(&entries),
            Err(Error::InvalidEntry { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_corpus_keeps_existing_songs() {
        let mut conn = open_in_memory().unwrap();
        insert_song(&mut conn, NewSong::new(1, "a", "a")).unwrap();
        assert_eq!(import_corpus(&mut conn, &[]).unwrap(), 0);
        assert_eq!(count_songs(&conn).unwrap(), 1);
    }

    #[test]
    fn test_import_from_missing_file() {
        let mut conn = open_in_memory().unwrap();
        let result = import_from_file(&mut conn, Path::new("/nonexistent/song.json"));
        assert!(matches!(result, Err(Error::CorpusNotFound(_))));
    }
}
