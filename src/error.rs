//! Error taxonomy (§7). Matches the teacher's own `DataFormatError`/
//! `NoBddError` idiom: a plain enum with a hand-written `Display`, no
//! `thiserror`/`anyhow`.
//!
//! `InternalInvariantBreach` (a BDD invariant violated by the engine
//! itself) is deliberately not a variant here — per §7 that is a
//! programmer error and fails loud via `panic!`/`debug_assert!` inside the
//! engine, not something a caller can recover from.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AnalysisError {
    /// The reference source adapter could not make sense of a file.
    /// Recoverable at the façade's multi-file boundary: the file is
    /// skipped, every other file is still analyzed.
    Parse { path: PathBuf, message: String },

    /// Fatal for the file it names, not for the run.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Parse { path, message } => {
                write!(f, "{}: parse error: {}", path.display(), message)
            }
            AnalysisError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}
