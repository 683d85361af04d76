//! Hardware and workload catalogs
//!
//! The catalogs name every entity an invocation may reference:
//!
//! - **Hardware**: top-level keys of the hardware database (`config_hwdb.yaml`)
//! - **Workload**: `*.json` descriptors in the workload directory
//!
//! Reference validation is a pure membership test and must run before the
//! runtime document is touched.
//!
//! # Example
//!
//! ```
//! use runcfg_catalog::{validate_hardware, HardwareCatalog};
//!
//! let catalog = HardwareCatalog::from_yaml_str("u250_rocket:\n  bitstream: x\n").unwrap();
//! assert!(validate_hardware("u250_rocket", &catalog).is_ok());
//! assert!(validate_hardware("u250_boom", &catalog).is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod catalog;
pub mod error;
pub mod validation;

pub use catalog::{HardwareCatalog, WorkloadCatalog, WORKLOAD_EXTENSION};
pub use error::{CatalogError, CatalogKind, InvalidReference};
pub use validation::{validate_hardware, validate_workload};
