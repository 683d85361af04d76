//! Error types for the runtime document store

use std::path::PathBuf;

/// Errors while loading, editing or saving the runtime document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document is not valid YAML
    #[error("runtime document is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Document has no content
    #[error("runtime document is empty")]
    Empty,

    /// More than one YAML document in the file
    #[error("runtime document holds {count} YAML documents, expected one")]
    MultiDocument { count: usize },

    /// A mapping was required at `path`
    #[error("'{path}' is not a mapping")]
    NotAMapping { path: String },

    /// Field holds a collection, not a scalar
    #[error("'{path}' holds a nested collection and cannot be overwritten with a scalar")]
    NotScalar { path: String },

    /// Line layout the editor refuses to rewrite
    #[error("cannot edit '{path}' at line {line}: {reason}")]
    UnsupportedLayout {
        path: String,
        line: usize,
        reason: &'static str,
    },

    /// Edited document did not read back the written value
    #[error("edit of '{path}' did not read back as the written value")]
    EditRejected { path: String },

    /// Malformed field path
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// IO error reading or writing the document
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create unsupported layout error; `index` is zero-based
    pub(crate) fn unsupported(path: impl Into<String>, index: usize, reason: &'static str) -> Self {
        Self::UnsupportedLayout {
            path: path.into(),
            line: index + 1,
            reason,
        }
    }
}
