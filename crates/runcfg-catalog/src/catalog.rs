//! Catalog sources
//!
//! Both catalogs are read-only sets built once per invocation. They are
//! loaded before anything else so that a broken deploy directory is reported
//! ahead of argument errors.

use crate::error::CatalogError;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// File extension of workload descriptors
pub const WORKLOAD_EXTENSION: &str = "json";

/// Set of valid hardware configuration names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardwareCatalog {
    names: BTreeSet<String>,
}

impl HardwareCatalog {
    /// Build a catalog from the top-level keys of a hardware database
    ///
    /// Keys that are not strings can never match a command-line identifier
    /// and are skipped.
    ///
    /// # Errors
    /// Returns error if the text is not YAML or its root is not a mapping
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_yaml::from_str(content)?;
        let map = match root {
            Value::Mapping(map) => map,
            other => {
                return Err(CatalogError::NotAMapping {
                    found: value_kind(&other),
                })
            }
        };

        let names = map
            .keys()
            .filter_map(|key| key.as_str().map(str::to_owned))
            .collect();
        Ok(Self { names })
    }

    /// Load the hardware database at `path`
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::debug!(
            "Loaded {} hardware configurations from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.names.contains(id)
    }

    /// Number of hardware configurations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for HardwareCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Set of workload descriptor file names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadCatalog {
    files: BTreeSet<String>,
}

impl WorkloadCatalog {
    /// Collect the `*.json` file names directly inside `dir`
    ///
    /// Matching follows a `*.json` glob: case-sensitive, not recursive, and
    /// blind to dot-files. Directories named `*.json` are not workloads.
    ///
    /// # Errors
    /// Returns error if the directory cannot be listed
    pub fn scan_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::io_error(dir, e))?;

        let mut files = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::io_error(dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(WORKLOAD_EXTENSION) {
                continue;
            }
            match path.file_name().and_then(|name| name.to_str()) {
                Some(name) if !name.starts_with('.') => {
                    files.insert(name.to_owned());
                }
                _ => {}
            }
        }

        tracing::debug!("Found {} workloads in {}", files.len(), dir.display());
        Ok(Self { files })
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, file_name: &str) -> bool {
        self.files.contains(file_name)
    }

    /// Number of workloads
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate file names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for WorkloadCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn hardware_catalog_top_level_keys() {
        let catalog = HardwareCatalog::from_yaml_str(
            r#"
alveo_u280_rocket_singlecore:
  bitstream_tar: file://u280.tar.gz
  deploy_quintuplet_override: null
alveo_u250_boom:
  bitstream_tar: file://u250.tar.gz
"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("alveo_u280_rocket_singlecore"));
        assert!(catalog.contains("alveo_u250_boom"));
        // nested keys are not hardware names
        assert!(!catalog.contains("bitstream_tar"));
    }

    #[test]
    fn hardware_catalog_skips_non_string_keys() {
        let catalog = HardwareCatalog::from_yaml_str("42: x\nrocket: y\n").unwrap();
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["rocket"]);
        assert!(!catalog.contains("42"));
    }

    #[test]
    fn hardware_catalog_rejects_sequence_root() {
        let result = HardwareCatalog::from_yaml_str("- rocket\n- boom\n");
        assert!(matches!(
            result,
            Err(CatalogError::NotAMapping { found: "sequence" })
        ));
    }

    #[test]
    fn hardware_catalog_rejects_null_document() {
        let result = HardwareCatalog::from_yaml_str("~\n");
        assert!(matches!(result, Err(CatalogError::NotAMapping { found: "null" })));
    }

    #[test]
    fn hardware_catalog_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = HardwareCatalog::load(dir.path().join("config_hwdb.yaml"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn workload_catalog_scans_json_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("linux-uniform.json"), "{}").unwrap();
        fs::write(dir.path().join("br-base.json"), "{}").unwrap();
        fs::write(dir.path().join("README.md"), "docs").unwrap();
        fs::write(dir.path().join("upper.JSON"), "{}").unwrap();
        fs::write(dir.path().join(".hidden.json"), "{}").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let catalog = WorkloadCatalog::scan_dir(dir.path()).unwrap();

        assert_eq!(
            catalog.iter().collect::<Vec<_>>(),
            vec!["br-base.json", "linux-uniform.json"]
        );
        assert!(!catalog.contains("README.md"));
        assert!(!catalog.contains("nested.json"));
    }

    #[test]
    fn workload_catalog_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = WorkloadCatalog::scan_dir(dir.path().join("workloads"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn catalogs_from_iter() {
        let hw: HardwareCatalog = ["a", "b"].into_iter().collect();
        let wl: WorkloadCatalog = vec!["x.json".to_string()].into_iter().collect();
        assert!(hw.contains("a") && !hw.is_empty());
        assert!(wl.contains("x.json"));
        assert!(WorkloadCatalog::default().is_empty());
    }
}
