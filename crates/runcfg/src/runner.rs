//! Invocation pipeline
//!
//! Validation runs to completion before the document is touched. The
//! mutation is staged on the loaded copy and handed to the store only when
//! every field was written.

use crate::error::RunResult;
use crate::layout::DeployLayout;
use runcfg_catalog::{validate_hardware, validate_workload, HardwareCatalog, WorkloadCatalog};
use runcfg_document::{apply, DocumentStore, FileStore, RuntimeDocument};
use runcfg_resolve::{resolve, resolve_flag, RawInvocation, ResolvedParameters};

/// Whether the mutated document is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Save through the store
    #[default]
    Persist,
    /// Stop after mutating; the caller prints the result
    DryRun,
}

/// Both reference catalogs
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    /// Hardware configuration names
    pub hardware: HardwareCatalog,
    /// Workload descriptor file names
    pub workloads: WorkloadCatalog,
}

impl Catalogs {
    /// Load both catalogs from a deploy layout
    ///
    /// # Errors
    /// Returns error if the hardware database or workload directory cannot
    /// be read
    pub fn load(layout: &DeployLayout) -> RunResult<Self> {
        Ok(Self {
            hardware: HardwareCatalog::load(&layout.hwdb)?,
            workloads: WorkloadCatalog::scan_dir(&layout.workloads)?,
        })
    }
}

/// Result of a successful invocation
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Validated parameters
    pub params: ResolvedParameters,
    /// Field paths written, in write order
    pub touched: Vec<&'static str>,
    /// Document after mutation
    pub document: RuntimeDocument,
    /// Whether the document was saved
    pub persisted: bool,
}

/// Validate `invocation` and apply it to the document in `store`
///
/// Order: argument shape, hardware reference, tracing flag, workload
/// reference, remaining gates, document load, mutation, save. The first
/// failure wins.
///
/// # Errors
/// Returns the first validation, document or store error
pub fn execute<S>(
    invocation: &RawInvocation,
    catalogs: &Catalogs,
    store: &S,
    mode: WriteMode,
) -> RunResult<Outcome>
where
    S: DocumentStore + ?Sized,
{
    let shape = invocation.shape()?;
    validate_hardware(shape.hardware_id, &catalogs.hardware)?;
    resolve_flag(shape.tracing_flag)?;
    validate_workload(shape.workload_id, &catalogs.workloads)?;
    let params = resolve(&shape)?;

    let mut document = store.load()?;
    let touched = apply(&mut document, &params)?;

    let persisted = match mode {
        WriteMode::Persist => {
            store.save(&document)?;
            true
        }
        WriteMode::DryRun => false,
    };

    tracing::info!(
        hardware = %params.hardware_id,
        workload = %params.workload_id,
        enable = params.tracing.flag().as_token(),
        fields = touched.len(),
        persisted,
        "Applied invocation"
    );

    Ok(Outcome {
        params,
        touched,
        document,
        persisted,
    })
}

/// Run an invocation against the files of a deploy directory
///
/// Catalogs are loaded first, so a broken deploy directory is reported
/// ahead of argument errors.
///
/// # Errors
/// Returns error if a catalog cannot be loaded or [`execute`] fails
pub fn run(
    layout: &DeployLayout,
    invocation: &RawInvocation,
    mode: WriteMode,
) -> RunResult<Outcome> {
    let catalogs = Catalogs::load(layout)?;
    let store = FileStore::new(&layout.runtime_config);
    execute(invocation, &catalogs, &store, mode)
}
