//! Property tests for the gate pipeline

use proptest::prelude::*;
use runcfg_resolve::{resolve, ErrorKind, RawInvocation, ResolveError, TracingPlan};

fn run(args: Vec<String>) -> Result<runcfg_resolve::ResolvedParameters, ResolveError> {
    let invocation = RawInvocation::new(args);
    resolve(&invocation.shape()?)
}

fn base(flag: &str) -> Vec<String> {
    vec!["hw1".to_string(), flag.to_string(), "wl.json".to_string()]
}

proptest! {
    #[test]
    fn prop_disabled_never_reads_trailing(extra in proptest::collection::vec(".*", 0..6)) {
        let mut args = base("no");
        args.extend(extra.into_iter().filter(|a| !a.starts_with('+')));
        let params = run(args).unwrap();
        prop_assert_eq!(params.tracing, TracingPlan::NoTracing);
    }

    #[test]
    fn prop_unknown_flag_is_invalid_argument(flag in "[a-zA-Z]{0,6}") {
        prop_assume!(flag != "yes" && flag != "no");
        let err = run(base(&flag)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn prop_format_out_of_range_fails(format in 3u64..1000, selector in 0u64..4) {
        let mut args = base("yes");
        args.extend([format.to_string(), selector.to_string(), "1".into(), "2".into()]);
        let err = run(args).unwrap_err();
        let is_mode_error = matches!(err, ResolveError::InvalidTracingMode { .. });
        prop_assert!(is_mode_error);
    }

    #[test]
    fn prop_selector_zero_ignores_window(format in 0u64..3, start in ".*", end in ".*") {
        prop_assume!(!end.starts_with('+'));
        let mut args = base("yes");
        args.extend([format.to_string(), "0".into(), start, end]);
        let params = run(args).unwrap();
        let is_tracing_only = matches!(params.tracing, TracingPlan::TracingOnly { .. });
        prop_assert!(is_tracing_only);
    }

    #[test]
    fn prop_resolution_is_deterministic(
        format in 0u64..3,
        selector in 0u64..4,
        start in "[0-9a-f]{1,8}",
        end in "[0-9a-f]{1,8}",
    ) {
        let mut args = base("yes");
        args.extend([format.to_string(), selector.to_string(), start, end]);
        prop_assert_eq!(run(args.clone()), run(args));
    }
}
