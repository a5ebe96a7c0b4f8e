//! Unified error type for search operations.
//!
//! Only whole-search-invalidating conditions become errors: a file filter
//! that fails to parse, or a search root that cannot be read. Per-file
//! problems are absorbed where they occur so one unreadable file never
//! aborts an otherwise-successful search.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can surface from a search call.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A user-supplied file filter token is not a valid glob.
    /// Raised before any traversal begins.
    #[error("invalid file filter '{token}': {source}")]
    FilterParse {
        token: String,
        #[source]
        source: globset::Error,
    },

    /// The search root itself cannot be opened or read.
    #[error("cannot read search root '{path}': {source}")]
    RootAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Other I/O error (terminal setup, logging).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
