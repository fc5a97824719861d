//! Ratatui search browser. It only renders what `Catalog` returns: a query
//! line, the ranked results with their snippets and the selected song's
//! lyrics with the matching line highlighted.

mod app;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
