//! Positional invocation handling
//!
//! ```text
//! <hardware_id> <yes|no> <workload_id> [<format> <selector> [<start> <end>]] [+sample_rate=N]
//! ```

use crate::error::ResolveError;

/// Number of arguments every invocation must carry
pub const MANDATORY_ARGS: usize = 3;

/// Prefix of the optional trailing sample-rate token
pub const SAMPLE_RATE_PREFIX: &str = "+sample_rate=";

/// Older spelling of [`SAMPLE_RATE_PREFIX`], still accepted
pub const LEGACY_SAMPLE_RATE_PREFIX: &str = "+read_rate=";

/// Command-line arguments, without the program name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInvocation {
    args: Vec<String>,
}

impl RawInvocation {
    /// Wrap an argument list
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments in order
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Split into mandatory, trailing and sample-rate parts
    ///
    /// Only an argument after the mandatory three can be the sample-rate
    /// token, and only the last one. A last argument without the prefix is
    /// an ordinary positional argument.
    ///
    /// # Errors
    /// [`ResolveError::Usage`] when fewer than three arguments are given
    pub fn shape(&self) -> Result<InvocationShape<'_>, ResolveError> {
        let [hardware_id, tracing_flag, workload_id, rest @ ..] = self.args.as_slice() else {
            return Err(ResolveError::Usage {
                expected: MANDATORY_ARGS,
                found: self.args.len(),
            });
        };

        let (trailing, sample_rate_token) = match rest.split_last() {
            Some((last, init)) if sample_rate_value(last).is_some() => {
                (init, sample_rate_value(last))
            }
            _ => (rest, None),
        };

        Ok(InvocationShape {
            hardware_id,
            tracing_flag,
            workload_id,
            trailing,
            sample_rate_token,
        })
    }
}

/// Borrowed view of an invocation with a valid argument count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationShape<'a> {
    /// First argument
    pub hardware_id: &'a str,
    /// Second argument, unvalidated
    pub tracing_flag: &'a str,
    /// Third argument
    pub workload_id: &'a str,
    /// Positional arguments after the mandatory three
    pub trailing: &'a [String],
    /// Text after the sample-rate prefix, when the token is present
    pub sample_rate_token: Option<&'a str>,
}

fn sample_rate_value(arg: &str) -> Option<&str> {
    arg.strip_prefix(SAMPLE_RATE_PREFIX)
        .or_else(|| arg.strip_prefix(LEGACY_SAMPLE_RATE_PREFIX))
}
