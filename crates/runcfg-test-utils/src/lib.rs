//! Testing utilities for the runcfg workspace
//!
//! Deploy-directory fixtures on disk.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HWDB: &str = "\
# FPGA builds available to this deploy
alveo_u280_rocket_singlecore:
  bitstream_tar: file:///opt/bit/u280-rocket.tar.gz
  deploy_quintuplet_override: null
  custom_runtime_config: null
alveo_u250_boom_singlecore:
  bitstream_tar: file:///opt/bit/u250-boom.tar.gz
  deploy_quintuplet_override: null
  custom_runtime_config: null
";

pub const WORKLOADS: &[&str] = &["linux-uniform.json", "br-base.json"];

pub const RUNTIME: &str = "\
# Runtime configuration
run_farm:
  base_recipe: run-farm-recipes/externally_provisioned.yaml

metasimulation:
  metasimulation_enabled: false

target_config:
  topology: no_net_config
  no_net_num_nodes: 1
  default_hw_config: alveo_u250_boom_singlecore  # default build

tracing:
  enable: no

  # 0 = human readable; 1 = binary; 2 = flamegraph
  output_format: 0

  # trigger selector
  selector: 1
  start: 0
  end: -1

autocounter:
  read_rate: 0

workload:
  workload_name: br-base.json
  terminate_on_completion: no
";

pub const HARDWARE_ID: &str = "alveo_u280_rocket_singlecore";
pub const WORKLOAD_ID: &str = "linux-uniform.json";

/// Deploy directory in a temporary location
#[derive(Debug)]
pub struct DeployFixture {
    dir: TempDir,
}

impl DeployFixture {
    /// Standard fixture: [`HWDB`], [`WORKLOADS`] and [`RUNTIME`]
    pub fn new() -> Self {
        Self::with_runtime(RUNTIME)
    }

    /// Standard catalogs with a custom runtime document
    pub fn with_runtime(runtime: &str) -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fs::write(fixture.hwdb_path(), HWDB).unwrap();
        fs::create_dir(fixture.workloads_dir()).unwrap();
        for name in WORKLOADS {
            fixture.add_workload(name);
        }
        fixture.write_runtime(runtime);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn hwdb_path(&self) -> PathBuf {
        self.path().join("config_hwdb.yaml")
    }

    pub fn workloads_dir(&self) -> PathBuf {
        self.path().join("workloads")
    }

    pub fn runtime_path(&self) -> PathBuf {
        self.path().join("config_runtime.yaml")
    }

    pub fn add_workload(&self, name: &str) {
        fs::write(self.workloads_dir().join(name), "{\"benchmark_name\": \"test\"}\n").unwrap();
    }

    pub fn write_runtime(&self, text: &str) {
        fs::write(self.runtime_path(), text).unwrap();
    }

    pub fn runtime_text(&self) -> String {
        fs::read_to_string(self.runtime_path()).unwrap()
    }
}

impl Default for DeployFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Argument vector from string slices
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
