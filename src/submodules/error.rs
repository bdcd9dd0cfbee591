use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading simulation output or rendering plots.
#[derive(Debug, Error)]
pub enum PlotError {
    /// File could not be opened or read
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed numeric text
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Table row with a different column count than the first row
    #[error("{}:{line}: expected {expected} columns, found {found}", path.display())]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("'{}' contains no data rows", path.display())]
    EmptyField { path: PathBuf },

    /// Field shape incompatible with the coordinate mesh
    #[error("{name}: shape {found:?} does not match mesh shape {expected:?}")]
    ShapeMismatch {
        name: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Drawing backend failure
    #[error("rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;
