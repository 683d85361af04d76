//! Error types for parameter resolution
//!
//! Every variant is a user-input error: terminal, reported once, never
//! retried.

use crate::encoding::BoundError;
use crate::params::RangeTrigger;

/// Coarse error category used for diagnostics and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument count or shape
    Usage,
    /// Missing, malformed or out-of-range value
    InvalidArgument,
}

/// Resolution failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Fewer positional arguments than the mandatory three
    #[error("expected at least {expected} arguments, got {found}")]
    Usage { expected: usize, found: usize },

    /// Tracing flag is not exactly `yes` or `no`
    #[error("tracing flag must be 'yes' or 'no', got '{value}'")]
    InvalidTracingFlag { value: String },

    /// Output format / trigger selector pair missing, non-numeric or out of
    /// range; the two are always reported together
    #[error(
        "output format and trigger selector must be integers in 0..=2 and 0..=3 \
         (output_format={}, trigger_selector={})",
        shown(.output_format),
        shown(.trigger_selector)
    )]
    InvalidTracingMode {
        output_format: Option<String>,
        trigger_selector: Option<String>,
    },

    /// Window bounds missing or not encoded as the trigger requires
    #[error(
        "start and end for the {selector} must be {} (start={}, end={}): {reason}",
        bound_encoding(.selector),
        shown(.start),
        shown(.end)
    )]
    InvalidRange {
        selector: RangeTrigger,
        start: Option<String>,
        end: Option<String>,
        #[source]
        reason: BoundError,
    },

    /// `+sample_rate=` token with a non-integer value
    #[error("sample rate must be a non-negative integer, got '{value}'")]
    InvalidSampleRate { value: String },
}

impl ResolveError {
    /// Category of this error
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage { .. } => ErrorKind::Usage,
            Self::InvalidTracingFlag { .. }
            | Self::InvalidTracingMode { .. }
            | Self::InvalidRange { .. }
            | Self::InvalidSampleRate { .. } => ErrorKind::InvalidArgument,
        }
    }
}

fn shown(arg: &Option<String>) -> String {
    match arg {
        Some(value) => format!("'{value}'"),
        None => "<missing>".to_string(),
    }
}

fn bound_encoding(selector: &RangeTrigger) -> &'static str {
    if selector.uses_hex_bounds() {
        "hexadecimal digit strings"
    } else {
        "decimal integers"
    }
}
