//! Fatal errors of a compilation.

use std::io;
use std::path::PathBuf;

/// Errors that abort a compilation.
///
/// Recoverable per-node problems are not errors; see
/// [`crate::domain::diagnostic::Diagnostic`].
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to read source file {}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    MalformedSource { path: String, message: String },

    #[error("failed to write markup")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CompileError>;
