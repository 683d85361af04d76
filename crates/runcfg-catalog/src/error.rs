//! Error types for catalog loading and reference validation

use std::fmt;
use std::path::PathBuf;

/// Which catalog a reference was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Hardware database keys
    Hardware,
    /// Workload descriptor file names
    Workload,
}

impl CatalogKind {
    /// Human-readable catalog name used in diagnostics
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hardware => "hardware database",
            Self::Workload => "workload directory",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier not present in the catalog it must belong to
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{id}' is not an entry of the {catalog}")]
pub struct InvalidReference {
    /// The offending identifier
    pub id: String,
    /// Catalog the identifier was checked against
    pub catalog: CatalogKind,
}

impl InvalidReference {
    /// Create a new invalid reference error
    pub fn new(id: impl Into<String>, catalog: CatalogKind) -> Self {
        Self {
            id: id.into(),
            catalog,
        }
    }
}

/// Errors while loading a catalog from disk
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error reading the catalog source
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hardware database is not valid YAML
    #[error("hardware database is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Hardware database root is not a mapping
    #[error("hardware database must be a mapping of hardware names, found {found}")]
    NotAMapping { found: &'static str },
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
