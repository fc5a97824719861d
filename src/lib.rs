//! Core library for the Tarnim hymn lookup tool.
//!
//! The search path is normalizer → song store → query resolver → snippet
//! extractor; [`Catalog`] ties them together for the binary and any other
//! front-end.
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod normalize;
pub mod search;
pub mod snippet;
pub mod ui;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};

/// The domain types other layers manipulate.
pub use models::{MatchKind, NewSong, RawSongEntry, SearchResult, Song};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
