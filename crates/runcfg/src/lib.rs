//! runcfg
//!
//! Edits the runtime configuration of a deploy directory from a positional
//! invocation:
//!
//! ```text
//! runcfg <hardware_id> <yes|no> <workload_id> [<output_format> <trigger_selector> [<start> <end>]] [+sample_rate=N]
//! ```
//!
//! # Pipeline
//!
//! ```text
//! args → shape → catalogs → references → gates → load → sparse overwrite → save
//! ```
//!
//! Everything before `save` is validation; any failure returns before the
//! document is written.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod error;
pub mod layout;
pub mod logging;
pub mod runner;

pub use error::{ErrorCategory, RunError, RunResult};
pub use layout::DeployLayout;
pub use runner::{execute, run, Catalogs, Outcome, WriteMode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
