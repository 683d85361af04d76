//! Command-line surface

use crate::layout::DeployLayout;
use crate::logging::DEFAULT_LOG_LEVEL;
use crate::runner::WriteMode;
use clap::Parser;
use runcfg_resolve::RawInvocation;
use std::path::PathBuf;

/// Usage text printed after a user-input diagnostic
pub const USAGE: &str = "\
usage: runcfg [OPTIONS] <hardware_id> <yes|no> <workload_id> [<output_format> <trigger_selector> [<start> <end>]] [+sample_rate=N]

  output_format     0 human readable, 1 binary, 2 flamegraph
  trigger_selector  0 always, 1 cycle, 2 program counter (hex), 3 instruction (hex)
  start, end        window bounds, required when trigger_selector is not 0

example: runcfg alveo_u280_rocket_singlecore yes linux-uniform.json 0 2 80000000 80001000";

/// Apply a workload invocation to `config_runtime.yaml`
#[derive(Debug, Parser)]
#[command(name = "runcfg", version, about, long_about = None)]
pub struct Cli {
    /// Deploy directory holding the hardware database, workloads and runtime config
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub deploy_dir: PathBuf,

    /// Hardware database (default: <DEPLOY_DIR>/config_hwdb.yaml)
    #[arg(long, value_name = "FILE")]
    pub hwdb: Option<PathBuf>,

    /// Workload directory (default: <DEPLOY_DIR>/workloads)
    #[arg(long, value_name = "DIR")]
    pub workloads: Option<PathBuf>,

    /// Runtime document to edit (default: <DEPLOY_DIR>/config_runtime.yaml)
    #[arg(long, value_name = "FILE")]
    pub runtime_config: Option<PathBuf>,

    /// Print the edited document to stdout instead of saving it
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Positional invocation; options must come before it
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// Deploy layout with overrides applied
    #[must_use]
    pub fn layout(&self) -> DeployLayout {
        let mut layout = DeployLayout::new(&self.deploy_dir);
        if let Some(hwdb) = &self.hwdb {
            layout = layout.with_hwdb(hwdb);
        }
        if let Some(workloads) = &self.workloads {
            layout = layout.with_workloads(workloads);
        }
        if let Some(runtime) = &self.runtime_config {
            layout = layout.with_runtime_config(runtime);
        }
        layout
    }

    /// Positional arguments as an invocation
    ///
    /// The argument count is checked by the pipeline, not by the parser, so
    /// short invocations get the same diagnostic as every other error.
    #[must_use]
    pub fn invocation(&self) -> RawInvocation {
        RawInvocation::new(self.args.iter().cloned())
    }

    /// Requested write mode
    #[inline]
    #[must_use]
    pub fn write_mode(&self) -> WriteMode {
        if self.dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Persist
        }
    }
}
