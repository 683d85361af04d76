//! Conditional parameter resolution
//!
//! Turns a positional invocation into typed [`ResolvedParameters`]. Which
//! arguments are required depends on earlier ones:
//!
//! ```text
//! <yes|no> ──no──▶ NoTracing
//!    │
//!   yes
//!    ▼
//! <output_format> <trigger_selector> ──selector 0──▶ TracingOnly
//!    │
//!  selector 1..=3
//!    ▼
//! <range_start> <range_end> ──▶ TracingWithRange
//! ```
//!
//! Each gate either yields the next typed stage or aborts with a
//! [`ResolveError`]. Nothing is resolved partially.
//!
//! # Example
//!
//! ```
//! use runcfg_resolve::{resolve, RangeBound, RawInvocation, TracingPlan};
//!
//! let invocation = RawInvocation::new(["hw1", "yes", "wl.json", "1", "2", "a1", "10"]);
//! let params = resolve(&invocation.shape().unwrap()).unwrap();
//!
//! match params.tracing {
//!     TracingPlan::TracingWithRange { start, end, .. } => {
//!         assert_eq!(start, RangeBound::HexDigits("a1".to_string()));
//!         assert_eq!(end, RangeBound::Decimal(10));
//!     }
//!     other => panic!("unexpected plan: {other:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod encoding;
pub mod error;
pub mod invocation;
pub mod params;
pub mod resolver;

pub use encoding::{normalize_hex_bound, parse_decimal_bound, BoundError};
pub use error::{ErrorKind, ResolveError};
pub use invocation::{
    InvocationShape, RawInvocation, LEGACY_SAMPLE_RATE_PREFIX, MANDATORY_ARGS,
    SAMPLE_RATE_PREFIX,
};
pub use params::{
    OutputFormat, RangeBound, RangeTrigger, ResolvedParameters, TracingFlag, TracingPlan,
    TriggerSelector,
};
pub use resolver::{resolve, resolve_flag};
