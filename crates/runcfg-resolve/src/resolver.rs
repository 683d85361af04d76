//! Gate pipeline
//!
//! Gates run in order and the first violation aborts:
//!
//! 0. tracing flag is `yes` or `no`
//! 1. tracing enabled: output format and trigger selector
//! 2. selector non-zero: start and end, encoded per selector
//!
//! The sample rate is read between gate 0 and gate 1.

use crate::encoding::{decimal_value, normalize_hex_bound, parse_decimal_bound, BoundError};
use crate::error::ResolveError;
use crate::invocation::InvocationShape;
use crate::params::{
    OutputFormat, RangeBound, RangeTrigger, ResolvedParameters, TracingFlag, TracingPlan,
    TriggerSelector,
};

/// Gate 0 on its own
///
/// Callers that interleave reference checks with the gates run this between
/// the hardware and workload checks; [`resolve`] runs it again.
///
/// # Errors
/// [`ResolveError::InvalidTracingFlag`] unless `token` is `yes` or `no`
pub fn resolve_flag(token: &str) -> Result<TracingFlag, ResolveError> {
    TracingFlag::from_token(token).ok_or_else(|| ResolveError::InvalidTracingFlag {
        value: token.to_owned(),
    })
}

/// Resolve a shaped invocation into typed parameters
///
/// References are not checked here; callers validate `hardware_id` and
/// `workload_id` against their catalogs.
///
/// # Errors
/// The first gate violation, as a [`ResolveError`]
pub fn resolve(shape: &InvocationShape<'_>) -> Result<ResolvedParameters, ResolveError> {
    let flag = resolve_flag(shape.tracing_flag)?;

    let sample_rate = match shape.sample_rate_token {
        Some(value) => decimal_value(value).map_err(|_| ResolveError::InvalidSampleRate {
            value: value.to_owned(),
        })?,
        None => 0,
    };

    let tracing = match flag {
        TracingFlag::Disabled => {
            if !shape.trailing.is_empty() {
                tracing::warn!(
                    "Tracing disabled; ignoring {} trailing argument(s)",
                    shape.trailing.len()
                );
            }
            TracingPlan::NoTracing
        }
        TracingFlag::Enabled => resolve_tracing(shape.trailing)?,
    };

    Ok(ResolvedParameters {
        hardware_id: shape.hardware_id.to_owned(),
        workload_id: shape.workload_id.to_owned(),
        sample_rate,
        tracing,
    })
}

fn resolve_tracing(trailing: &[String]) -> Result<TracingPlan, ResolveError> {
    let (format, selector) = resolve_mode(trailing)?;

    match selector {
        TriggerSelector::Always => {
            if trailing.len() > 2 {
                tracing::warn!(
                    "Trigger selector 0 takes no window; ignoring {} argument(s)",
                    trailing.len() - 2
                );
            }
            Ok(TracingPlan::TracingOnly { format })
        }
        TriggerSelector::Range(trigger) => {
            let (start, end) = resolve_window(trigger, trailing.get(2), trailing.get(3))?;
            Ok(TracingPlan::TracingWithRange {
                format,
                selector: trigger,
                start,
                end,
            })
        }
    }
}

/// Gate 1: both values checked as one unit
fn resolve_mode(trailing: &[String]) -> Result<(OutputFormat, TriggerSelector), ResolveError> {
    let format_arg = trailing.first();
    let selector_arg = trailing.get(1);

    let mode = format_arg.zip(selector_arg).and_then(|(format, selector)| {
        let format = OutputFormat::from_index(decimal_value(format).ok()?)?;
        let selector = TriggerSelector::from_index(decimal_value(selector).ok()?)?;
        Some((format, selector))
    });

    mode.ok_or_else(|| ResolveError::InvalidTracingMode {
        output_format: format_arg.cloned(),
        trigger_selector: selector_arg.cloned(),
    })
}

/// Gate 2
fn resolve_window(
    trigger: RangeTrigger,
    start_arg: Option<&String>,
    end_arg: Option<&String>,
) -> Result<(RangeBound, RangeBound), ResolveError> {
    let encode = |arg: Option<&String>| -> Result<RangeBound, BoundError> {
        let raw = arg.ok_or(BoundError::Missing)?;
        if trigger.uses_hex_bounds() {
            normalize_hex_bound(raw)
        } else {
            parse_decimal_bound(raw)
        }
    };

    encode(start_arg)
        .and_then(|start| encode(end_arg).map(|end| (start, end)))
        .map_err(|reason| ResolveError::InvalidRange {
            selector: trigger,
            start: start_arg.cloned(),
            end: end_arg.cloned(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::RawInvocation;
    use pretty_assertions::assert_eq;

    fn run(args: &[&str]) -> Result<ResolvedParameters, ResolveError> {
        let invocation = RawInvocation::new(args.iter().copied());
        resolve(&invocation.shape()?)
    }

    #[test]
    fn tracing_disabled_mandatory_only() {
        let params = run(&["hw1", "no", "wl.json"]).unwrap();
        assert_eq!(
            params,
            ResolvedParameters {
                hardware_id: "hw1".into(),
                workload_id: "wl.json".into(),
                sample_rate: 0,
                tracing: TracingPlan::NoTracing,
            }
        );
        assert!(!params.tracing_enabled());
    }

    #[test]
    fn tracing_disabled_ignores_garbage() {
        let params = run(&["hw1", "no", "wl.json", "9", "zz", "??"]).unwrap();
        assert_eq!(params.tracing, TracingPlan::NoTracing);
    }

    #[test]
    fn invalid_tracing_flag() {
        for flag in ["YES", "No", "true", "1", ""] {
            let err = run(&["hw1", flag, "wl.json"]).unwrap_err();
            assert_eq!(
                err,
                ResolveError::InvalidTracingFlag {
                    value: flag.to_string()
                }
            );
        }
    }

    #[test]
    fn flag_gate_alone() {
        assert_eq!(resolve_flag("yes"), Ok(TracingFlag::Enabled));
        assert_eq!(resolve_flag("no"), Ok(TracingFlag::Disabled));
        assert_eq!(
            resolve_flag("maybe"),
            Err(ResolveError::InvalidTracingFlag {
                value: "maybe".into()
            })
        );
    }

    #[test]
    fn selector_zero_ignores_malformed_window() {
        let params = run(&["hw1", "yes", "wl.json", "2", "0", "not-hex", "!!"]).unwrap();
        assert_eq!(
            params.tracing,
            TracingPlan::TracingOnly {
                format: OutputFormat::Flamegraph
            }
        );
    }

    #[test]
    fn hex_window_with_letters() {
        let params = run(&["hw1", "yes", "wl.json", "1", "2", "a1", "ff"]).unwrap();
        assert_eq!(
            params.tracing,
            TracingPlan::TracingWithRange {
                format: OutputFormat::Binary,
                selector: RangeTrigger::ProgramCounter,
                start: RangeBound::HexDigits("a1".into()),
                end: RangeBound::HexDigits("ff".into()),
            }
        );
    }

    #[test]
    fn hex_window_digits_reinterpreted_as_decimal() {
        let params = run(&["hw1", "yes", "wl.json", "1", "2", "10", "20"]).unwrap();
        assert_eq!(
            params.tracing,
            TracingPlan::TracingWithRange {
                format: OutputFormat::Binary,
                selector: RangeTrigger::ProgramCounter,
                start: RangeBound::Decimal(10),
                end: RangeBound::Decimal(20),
            }
        );
    }

    #[test]
    fn cycle_window_requires_decimal() {
        let params = run(&["hw1", "yes", "wl.json", "0", "1", "100", "2000"]).unwrap();
        assert_eq!(
            params.tracing,
            TracingPlan::TracingWithRange {
                format: OutputFormat::HumanReadable,
                selector: RangeTrigger::Cycle,
                start: RangeBound::Decimal(100),
                end: RangeBound::Decimal(2000),
            }
        );

        let err = run(&["hw1", "yes", "wl.json", "0", "1", "a1", "2000"]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidRange {
                selector: RangeTrigger::Cycle,
                reason: BoundError::NotDecimal,
                ..
            }
        ));
    }

    #[test]
    fn instruction_window_rejects_non_hex() {
        let err = run(&["hw1", "yes", "wl.json", "0", "3", "0x13", "ff"]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidRange {
                selector: RangeTrigger::Instruction,
                reason: BoundError::NotHex,
                ..
            }
        ));
    }

    #[test]
    fn window_missing_end() {
        let err = run(&["hw1", "yes", "wl.json", "0", "2", "a1"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidRange {
                selector: RangeTrigger::ProgramCounter,
                start: Some("a1".into()),
                end: None,
                reason: BoundError::Missing,
            }
        );
    }

    #[test]
    fn sample_rate_token_does_not_fill_window() {
        let err = run(&["hw1", "yes", "wl.json", "0", "2", "a1", "+sample_rate=5"]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidRange {
                reason: BoundError::Missing,
                ..
            }
        ));
    }

    #[test]
    fn output_format_out_of_range_always_fails() {
        for selector in ["0", "1", "2", "3", "9", "x"] {
            let err = run(&["hw1", "yes", "wl.json", "3", selector, "1", "2"]).unwrap_err();
            assert_eq!(
                err,
                ResolveError::InvalidTracingMode {
                    output_format: Some("3".into()),
                    trigger_selector: Some(selector.into()),
                }
            );
        }
    }

    #[test]
    fn mode_missing_or_malformed() {
        let err = run(&["hw1", "yes", "wl.json"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidTracingMode {
                output_format: None,
                trigger_selector: None,
            }
        );

        let err = run(&["hw1", "yes", "wl.json", "1", "4"]).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTracingMode { .. }));

        let err = run(&["hw1", "yes", "wl.json", "-1", "0"]).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTracingMode { .. }));
    }

    #[test]
    fn sample_rate_parsed() {
        let params = run(&["hw1", "no", "wl.json", "+sample_rate=250"]).unwrap();
        assert_eq!(params.sample_rate, 250);

        let err = run(&["hw1", "no", "wl.json", "+sample_rate=fast"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidSampleRate {
                value: "fast".into()
            }
        );
    }

    #[test]
    fn sample_rate_with_full_window() {
        let params = run(&[
            "hw1",
            "yes",
            "wl.json",
            "2",
            "3",
            "80000000",
            "8000ffff",
            "+sample_rate=1",
        ])
        .unwrap();
        assert_eq!(params.sample_rate, 1);
        assert_eq!(
            params.tracing,
            TracingPlan::TracingWithRange {
                format: OutputFormat::Flamegraph,
                selector: RangeTrigger::Instruction,
                start: RangeBound::Decimal(80_000_000),
                end: RangeBound::HexDigits("8000ffff".into()),
            }
        );
    }

    #[test]
    fn tracing_flag_checked_before_sample_rate() {
        let err = run(&["hw1", "maybe", "wl.json", "+sample_rate=x"]).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTracingFlag { .. }));
    }
}
