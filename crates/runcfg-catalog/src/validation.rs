//! Reference validation
//!
//! Pure set-membership checks with no side effects.

use crate::catalog::{HardwareCatalog, WorkloadCatalog};
use crate::error::{CatalogKind, InvalidReference};

/// Validate that `id` names a configuration in the hardware database
///
/// # Returns
/// - `Ok(())` if the catalog contains `id`
/// - `Err(InvalidReference)` naming `id` and the hardware catalog otherwise
pub fn validate_hardware(id: &str, catalog: &HardwareCatalog) -> Result<(), InvalidReference> {
    if catalog.contains(id) {
        Ok(())
    } else {
        Err(InvalidReference::new(id, CatalogKind::Hardware))
    }
}

/// Validate that `id` is a workload descriptor file name
///
/// The comparison is against bare file names, so `workloads/x.json` is
/// rejected even when `x.json` exists.
pub fn validate_workload(id: &str, catalog: &WorkloadCatalog) -> Result<(), InvalidReference> {
    if catalog.contains(id) {
        Ok(())
    } else {
        Err(InvalidReference::new(id, CatalogKind::Workload))
    }
}
