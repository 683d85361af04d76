//! Sparse-overwrite mutator
//!
//! Writes the fields a [`ResolvedParameters`] carries and nothing else.
//! Fields whose gate did not fire keep whatever an earlier run stored:
//! disabling tracing leaves `output_format`, `selector`, `start` and `end`
//! in place.

use crate::document::RuntimeDocument;
use crate::error::DocumentError;
use crate::scalar::ScalarValue;
use runcfg_resolve::{RangeBound, ResolvedParameters, TracingPlan, TriggerSelector};

/// Field paths in the runtime document
pub mod fields {
    /// Hardware configuration name
    pub const HARDWARE: &str = "target_config.default_hw_config";
    /// Tracing flag, `yes` or `no`
    pub const TRACING_ENABLE: &str = "tracing.enable";
    /// Trace output format
    pub const OUTPUT_FORMAT: &str = "tracing.output_format";
    /// Trace trigger selector
    pub const SELECTOR: &str = "tracing.selector";
    /// Trigger window start
    pub const START: &str = "tracing.start";
    /// Trigger window end
    pub const END: &str = "tracing.end";
    /// Instrumentation sample rate
    pub const SAMPLE_RATE: &str = "autocounter.read_rate";
    /// Workload descriptor file name
    pub const WORKLOAD: &str = "workload.workload_name";
}

impl From<&RangeBound> for ScalarValue {
    fn from(bound: &RangeBound) -> Self {
        match bound {
            RangeBound::Decimal(value) => Self::Integer(*value),
            RangeBound::HexDigits(digits) => Self::Text(digits.clone()),
        }
    }
}

/// Fields and values `params` writes, in write order
#[must_use]
pub fn planned_writes(params: &ResolvedParameters) -> Vec<(&'static str, ScalarValue)> {
    let mut writes = vec![
        (fields::HARDWARE, ScalarValue::text(params.hardware_id.as_str())),
        (
            fields::TRACING_ENABLE,
            ScalarValue::text(params.tracing.flag().as_token()),
        ),
        (fields::WORKLOAD, ScalarValue::text(params.workload_id.as_str())),
        (fields::SAMPLE_RATE, ScalarValue::Integer(params.sample_rate)),
    ];

    match &params.tracing {
        TracingPlan::NoTracing => {}
        TracingPlan::TracingOnly { format } => {
            writes.push((fields::OUTPUT_FORMAT, format.index().into()));
            writes.push((fields::SELECTOR, TriggerSelector::Always.index().into()));
        }
        TracingPlan::TracingWithRange {
            format,
            selector,
            start,
            end,
        } => {
            writes.push((fields::OUTPUT_FORMAT, format.index().into()));
            writes.push((fields::SELECTOR, selector.index().into()));
            writes.push((fields::START, start.into()));
            writes.push((fields::END, end.into()));
        }
    }

    writes
}

/// Apply `params` to `document`
///
/// All writes succeed or the document is left untouched.
///
/// # Returns
/// The paths written, in order
///
/// # Errors
/// The first field the document editor refuses
pub fn apply(
    document: &mut RuntimeDocument,
    params: &ResolvedParameters,
) -> Result<Vec<&'static str>, DocumentError> {
    let mut staged = document.clone();
    let mut touched = Vec::new();

    for (path, value) in planned_writes(params) {
        staged.set(path, &value)?;
        tracing::debug!("Set {} = {}", path, value);
        touched.push(path);
    }

    *document = staged;
    Ok(touched)
}
