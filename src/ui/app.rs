use std::path::PathBuf;

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::Catalog;
use crate::models::SearchResult;

use super::helpers::{highlighted_line, lyric_lines, result_lines, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the query line, borders included.
const SEARCH_BAR_HEIGHT: u16 = 3;
const SEARCH_PROMPT: &str = "Search: ";

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// State of the search browser. Every keystroke that edits the query re-runs
/// the search; the catalog does all the matching.
pub struct App {
    catalog: Catalog,
    corpus_path: PathBuf,
    query: String,
    results: Vec<SearchResult>,
    selected: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(catalog: Catalog, corpus_path: PathBuf) -> Self {
        let mut app = Self {
            catalog,
            corpus_path,
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            status: None,
        };
        app.refresh();
        app
    }

    /// Import the corpus file when the store is empty. Failures are reported in
    /// the footer; the browser still opens.
    pub fn import_if_empty(&mut self) {
        match self.catalog.is_empty() {
            Ok(true) if self.corpus_path.exists() => self.reimport(),
            Ok(true) => self.set_status(
                format!("No songs yet. Place song.json at {}", self.corpus_path.display()),
                StatusKind::Info,
            ),
            Ok(false) => {}
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Replace the stored corpus with the contents of the corpus file.
    pub fn reimport(&mut self) {
        match self.catalog.import_file(&self.corpus_path) {
            Ok(count) => {
                self.set_status(format!("Imported {count} songs."), StatusKind::Info);
                self.refresh();
            }
            Err(err) => {
                log::warn!("import from {} failed: {err}", self.corpus_path.display());
                self.set_status(format!("Import failed: {err}"), StatusKind::Error);
            }
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.refresh();
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc if self.query.is_empty() => return true,
            KeyCode::Esc => self.clear_query(),
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refresh();
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refresh();
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.results.len().saturating_sub(1),
            _ => {}
        }
        false
    }

    fn refresh(&mut self) {
        match self.catalog.search_with_snippets(&self.query) {
            Ok(results) => {
                self.results = results;
                if !matches!(self.status, Some(StatusMessage { kind: StatusKind::Info, .. })) {
                    self.status = None;
                }
            }
            Err(err) => {
                self.results.clear();
                self.set_status(format!("Search failed: {err}"), StatusKind::Error);
            }
        }
        self.selected = 0;
    }

    fn move_selection(&mut self, offset: isize) {
        if self.results.is_empty() {
            return;
        }
        let last = self.results.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    fn current(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_BAR_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        self.draw_search_bar(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        self.draw_results(frame, body[0]);
        self.draw_lyrics(frame, body[1]);

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Tarnim");
        let paragraph = Paragraph::new(Span::raw(format!("{SEARCH_PROMPT}{}", self.query)))
            .block(block.clone());
        frame.render_widget(paragraph, area);

        let inner = block.inner(area);
        let cursor_x = inner.x + SEARCH_PROMPT.len() as u16 + self.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        let title = format!("Results ({})", self.results.len());
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.results.is_empty() {
            let message = if self.query.trim().is_empty() {
                "The song list is empty."
            } else {
                "No songs match the current search."
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block)
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| ListItem::new(result_lines(result, index == self.selected)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_lyrics(&self, frame: &mut Frame, area: Rect) {
        let Some(result) = self.current() else {
            frame.render_widget(Block::default().borders(Borders::ALL), area);
            return;
        };

        let song = &result.song;
        let mut title = format!("{} - {}", song.number, song.title);
        if let Some(key) = &song.key {
            title.push_str(&format!(" [{key}]"));
        }
        let block = Block::default().borders(Borders::ALL).title(title);

        let highlight = highlighted_line(result);
        let visible_rows = area.height.saturating_sub(2) as usize;
        let scroll = highlight
            .map(|line| line.saturating_sub(visible_rows / 2))
            .unwrap_or(0);

        let paragraph = Paragraph::new(lyric_lines(&song.lyrics, highlight))
            .block(block)
            .scroll((scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let instructions = Line::from(vec![
            Span::styled("[↑↓]", key_style),
            Span::raw(" Navigate   "),
            Span::styled("[Ctrl+U]", key_style),
            Span::raw(" Clear   "),
            Span::styled("[Ctrl+R]", key_style),
            Span::raw(" Re-import   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Quit"),
        ]);

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
