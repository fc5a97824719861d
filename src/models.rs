//! Domain models that mirror the SQLite schema and get passed between the
//! store, the search layers and the TUI. They stay plain data holders; the
//! normalized fields are only ever filled in by the write path.

use std::fmt;

use serde::Deserialize;

use crate::normalize::normalize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A hymn as persisted in the `songs` table.
pub struct Song {
    /// Row id assigned on insert. History and snippets refer to songs by it.
    pub id: i64,
    /// Hymnal number. Not unique: alternate arrangements share a number.
    pub number: i64,
    pub title: String,
    /// Verses separated by `\n`. Line order is significant.
    pub lyrics: String,
    pub normalized_title: String,
    pub normalized_lyrics: String,
    /// Optional musical key, e.g. "Fm".
    pub key: Option<String>,
    pub category: Option<String>,
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.number, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A song ready to be written. Built through [`NewSong::new`] so the
/// normalized columns can never drift from the raw ones.
pub struct NewSong {
    number: i64,
    title: String,
    lyrics: String,
    normalized_title: String,
    normalized_lyrics: String,
    key: Option<String>,
    category: Option<String>,
}

impl NewSong {
    pub fn new(number: i64, title: impl Into<String>, lyrics: impl Into<String>) -> Self {
        let title = title.into();
        let lyrics = lyrics.into();
        Self {
            number,
            normalized_title: normalize(&title),
            normalized_lyrics: normalize(&lyrics),
            title,
            lyrics,
            key: None,
            category: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lyrics(&self) -> &str {
        &self.lyrics
    }

    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }

    pub fn normalized_lyrics(&self) -> &str {
        &self.normalized_lyrics
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Attach the id the store assigned to this song.
    pub(crate) fn into_song(self, id: i64) -> Song {
        Song {
            id,
            number: self.number,
            title: self.title,
            lyrics: self.lyrics,
            normalized_title: self.normalized_title,
            normalized_lyrics: self.normalized_lyrics,
            key: self.key,
            category: self.category,
        }
    }
}

/// Song number as it appears in a corpus file: usually text, sometimes a bare
/// JSON integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Integer(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
/// One entry of the bulk import corpus, before validation.
pub struct RawSongEntry {
    #[serde(rename = "song_number", default)]
    pub number: Option<RawNumber>,
    #[serde(rename = "song_title", default)]
    pub title: Option<String>,
    #[serde(rename = "song_lyrics", default)]
    pub lyrics: Option<String>,
}

impl RawSongEntry {
    pub fn new(number: &str, title: &str, lyrics: &str) -> Self {
        Self {
            number: Some(RawNumber::Text(number.to_string())),
            title: Some(title.to_string()),
            lyrics: Some(lyrics.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where the snippet of a [`SearchResult`] came from.
pub enum MatchKind {
    /// A lyric line contains the query.
    Lyric,
    /// Only the title contains the query.
    Title,
    /// Nothing matched (blank query or numeric lookup); first lyric line.
    FirstLine,
}

/// Prefix marking a snippet that shows the title instead of a lyric line.
pub const TITLE_TAG: &str = "🏷️ ";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A resolved song annotated with the line to highlight.
pub struct SearchResult {
    pub song: Song,
    pub query: String,
    pub matching_line: String,
    /// 1-based lyric line, or 0 when the title matched.
    pub match_line_number: usize,
    pub kind: MatchKind,
}
