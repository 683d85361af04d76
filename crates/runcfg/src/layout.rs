//! Deploy directory layout

use std::path::{Path, PathBuf};

/// Hardware database file name
pub const HWDB_FILE: &str = "config_hwdb.yaml";

/// Workload descriptor directory name
pub const WORKLOAD_DIR: &str = "workloads";

/// Runtime configuration file name
pub const RUNTIME_FILE: &str = "config_runtime.yaml";

/// Locations of the three collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployLayout {
    /// Hardware database
    pub hwdb: PathBuf,
    /// Directory of `*.json` workload descriptors
    pub workloads: PathBuf,
    /// Runtime document to edit
    pub runtime_config: PathBuf,
}

impl DeployLayout {
    /// Standard layout under `deploy_dir`
    pub fn new(deploy_dir: impl AsRef<Path>) -> Self {
        let dir = deploy_dir.as_ref();
        Self {
            hwdb: dir.join(HWDB_FILE),
            workloads: dir.join(WORKLOAD_DIR),
            runtime_config: dir.join(RUNTIME_FILE),
        }
    }

    /// Override the hardware database path
    #[must_use]
    pub fn with_hwdb(mut self, path: impl Into<PathBuf>) -> Self {
        self.hwdb = path.into();
        self
    }

    /// Override the workload directory
    #[must_use]
    pub fn with_workloads(mut self, path: impl Into<PathBuf>) -> Self {
        self.workloads = path.into();
        self
    }

    /// Override the runtime document path
    #[must_use]
    pub fn with_runtime_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.runtime_config = path.into();
        self
    }
}

impl Default for DeployLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
