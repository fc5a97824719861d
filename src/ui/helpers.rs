use std::error::Error;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{MatchKind, SearchResult};

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    let mut cause = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}

/// Two-line list entry: number and title, then the snippet.
pub(crate) fn result_lines(result: &SearchResult, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { "▶ " } else { "  " };
    let heading = Line::from(vec![
        Span::raw(marker),
        Span::styled(
            format!("{:>4}  ", result.song.number),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            result.song.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let snippet_style = match result.kind {
        MatchKind::Lyric => Style::default().fg(Color::Yellow),
        MatchKind::Title => Style::default().fg(Color::Magenta),
        MatchKind::FirstLine => Style::default().fg(Color::Gray),
    };
    let snippet = Line::from(vec![
        Span::raw("      "),
        Span::styled(result.matching_line.clone(), snippet_style),
    ]);

    vec![heading, snippet]
}

/// Lyrics split on `\n`, with the 1-based `highlight` line emphasized.
pub(crate) fn lyric_lines(lyrics: &str, highlight: Option<usize>) -> Vec<Line<'static>> {
    lyrics
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let text = line.trim_end().to_string();
            if highlight == Some(index + 1) {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect()
}

/// Line to highlight in the lyrics pane. Title and fallback snippets do not
/// point at a specific lyric line.
pub(crate) fn highlighted_line(result: &SearchResult) -> Option<usize> {
    (result.kind == MatchKind::Lyric).then_some(result.match_line_number)
}
