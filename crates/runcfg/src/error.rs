//! Error types for a runcfg invocation
//!
//! Wraps the per-crate errors and sorts them into the categories reported to
//! the user.

use runcfg_catalog::{CatalogError, InvalidReference};
use runcfg_document::DocumentError;
use runcfg_resolve::{ErrorKind, ResolveError};
use std::fmt;

/// Failure category; one diagnostic per category is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Wrong argument count or shape
    Usage,
    /// Identifier not in its catalog
    InvalidReference,
    /// Missing, malformed or out-of-range value
    InvalidArgument,
    /// Deploy directory problem: unreadable catalog, bad document, failed write
    Environment,
}

impl ErrorCategory {
    /// Whether the user's arguments caused the failure
    #[inline]
    #[must_use]
    pub fn is_user_input(self) -> bool {
        !matches!(self, Self::Environment)
    }

    /// Process exit code
    #[inline]
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Usage => 2,
            Self::InvalidReference | Self::InvalidArgument | Self::Environment => 1,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Usage => "usage error",
            Self::InvalidReference => "invalid reference",
            Self::InvalidArgument => "invalid argument",
            Self::Environment => "error",
        })
    }
}

/// Top-level runcfg error
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Argument shape or value rejected
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Hardware or workload not found
    #[error(transparent)]
    Reference(#[from] InvalidReference),

    /// Catalog could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Runtime document could not be loaded, edited or saved
    #[error("runtime document error: {0}")]
    Document(#[from] DocumentError),
}

impl RunError {
    /// Category of this error
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Resolve(err) => match err.kind() {
                ErrorKind::Usage => ErrorCategory::Usage,
                ErrorKind::InvalidArgument => ErrorCategory::InvalidArgument,
            },
            Self::Reference(_) => ErrorCategory::InvalidReference,
            Self::Catalog(_) | Self::Document(_) => ErrorCategory::Environment,
        }
    }

    /// Process exit code
    #[inline]
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }
}

/// Result type alias for runcfg operations
pub type RunResult<T> = Result<T, RunError>;

#[cfg(test)]
mod tests {
    use super::*;
    use runcfg_catalog::CatalogKind;

    #[test]
    fn categories() {
        let usage: RunError = ResolveError::Usage {
            expected: 3,
            found: 0,
        }
        .into();
        assert_eq!(usage.category(), ErrorCategory::Usage);
        assert_eq!(usage.exit_code(), 2);

        let flag: RunError = ResolveError::InvalidTracingFlag {
            value: "maybe".into(),
        }
        .into();
        assert_eq!(flag.category(), ErrorCategory::InvalidArgument);
        assert_eq!(flag.exit_code(), 1);

        let reference: RunError = InvalidReference::new("hw9", CatalogKind::Hardware).into();
        assert_eq!(reference.category(), ErrorCategory::InvalidReference);

        let document: RunError = DocumentError::Empty.into();
        assert_eq!(document.category(), ErrorCategory::Environment);
        assert!(!document.category().is_user_input());
    }

    #[test]
    fn transparent_display() {
        let err: RunError = InvalidReference::new("x.json", CatalogKind::Workload).into();
        assert_eq!(err.to_string(), "'x.json' is not an entry of the workload directory");
    }
}
