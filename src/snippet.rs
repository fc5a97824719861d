//! Pick the line to highlight for each resolved song.

use crate::models::{MatchKind, SearchResult, Song, TITLE_TAG};
use crate::normalize::normalize;

/// First non-blank lyric line, trimmed. Empty when the lyrics are blank.
fn first_line(lyrics: &str) -> String {
    lyrics
        .split('\n')
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Case-insensitive containment over already-normalized text.
fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn first_line_result(song: Song, query: &str) -> SearchResult {
    SearchResult {
        matching_line: first_line(&song.lyrics),
        query: query.to_string(),
        match_line_number: 1,
        kind: MatchKind::FirstLine,
        song,
    }
}

/// Annotate each song with the line that best explains why it matched.
///
/// The first lyric line containing the normalized query wins. Failing that a
/// title containing it is reported as line 0, tagged with [`TITLE_TAG`].
/// Otherwise the first non-blank lyric line is used as line 1. A blank query
/// always takes that last path.
pub fn annotate(songs: Vec<Song>, raw_query: &str) -> Vec<SearchResult> {
    let trimmed = raw_query.trim();
    if trimmed.is_empty() {
        return songs
            .into_iter()
            .map(|song| first_line_result(song, raw_query))
            .collect();
    }

    let needle = normalize(trimmed).to_lowercase();

    songs
        .into_iter()
        .map(|song| annotate_one(song, raw_query, &needle))
        .collect()
}

fn annotate_one(song: Song, raw_query: &str, needle: &str) -> SearchResult {
    if needle.is_empty() {
        return first_line_result(song, raw_query);
    }

    let lyric_hit = song
        .lyrics
        .split('\n')
        .enumerate()
        .find(|(_, line)| contains_folded(&normalize(line), needle))
        .map(|(index, line)| (index + 1, line.trim().to_string()));

    if let Some((line_number, line)) = lyric_hit {
        return SearchResult {
            matching_line: line,
            query: raw_query.to_string(),
            match_line_number: line_number,
            kind: MatchKind::Lyric,
            song,
        };
    }

    if contains_folded(&song.normalized_title, needle) {
        return SearchResult {
            matching_line: format!("{TITLE_TAG}{}", song.title),
            query: raw_query.to_string(),
            match_line_number: 0,
            kind: MatchKind::Title,
            song,
        };
    }

    first_line_result(song, raw_query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewSong;

    fn song(id: i64, number: i64, title: &str, lyrics: &str) -> Song {
        NewSong::new(number, title, lyrics).into_song(id)
    }

    #[test]
    fn test_lyric_line_match_reports_position() {
        let songs = vec![song(
            1,
            10,
            "ترنيمة الصباح",
            "\nفي الصباح نسبّح\n   يا رَبُّ أنتَ نوري  \nهللويا",
        )];
        let results = annotate(songs, "رب انت");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, MatchKind::Lyric);
        assert_eq!(results[0].match_line_number, 3);
        assert_eq!(results[0].matching_line, "يا رَبُّ أنتَ نوري");
        assert_eq!(results[0].query, "رب انت");
    }

    #[test]
    fn test_first_matching_line_wins() {
        let songs = vec![song(1, 1, "x", "سلام\nسلام سلام")];
        let results = annotate(songs, "سَلام");
        assert_eq!(results[0].match_line_number, 1);
    }

    #[test]
    fn test_title_match_is_tagged_line_zero() {
        let songs = vec![song(1, 5, "نشيد الفَرَح", "هللويا\nآمين")];
        let results = annotate(songs, "الفرح");
        assert_eq!(results[0].kind, MatchKind::Title);
        assert_eq!(results[0].match_line_number, 0);
        assert_eq!(results[0].matching_line, format!("{TITLE_TAG}نشيد الفَرَح"));
    }

    #[test]
    fn test_no_match_falls_back_to_first_line() {
        let songs = vec![song(1, 42, "عنوان", "\n  \nالسطر الأول\nالسطر الثاني")];
        let results = annotate(songs, "42");
        assert_eq!(results[0].kind, MatchKind::FirstLine);
        assert_eq!(results[0].match_line_number, 1);
        assert_eq!(results[0].matching_line, "السطر الأول");
    }

    #[test]
    fn test_blank_query_uses_first_line() {
        let songs = vec![
            song(1, 1, "a", "first\nsecond"),
            song(2, 2, "b", "   "),
        ];
        let results = annotate(songs, "  ");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].matching_line, "first");
        assert_eq!(results[0].match_line_number, 1);
        assert_eq!(results[1].matching_line, "");
        assert_eq!(results[1].match_line_number, 1);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let songs = vec![song(1, 9, "Grace", "Amazing Grace\nHow sweet")];
        let results = annotate(songs, "SWEET");
        assert_eq!(results[0].match_line_number, 2);
        assert_eq!(results[0].matching_line, "How sweet");
    }

    #[test]
    fn test_keeps_input_order() {
        let songs = vec![song(3, 30, "c", "c"), song(1, 10, "a", "a")];
        let ids: Vec<i64> = annotate(songs, "")
            .into_iter()
            .map(|r| r.song.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
