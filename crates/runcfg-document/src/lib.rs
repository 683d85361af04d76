//! Runtime document store
//!
//! Edits `config_runtime.yaml` in place. Only the lines holding the fields
//! being written change; comments, key order, quoting and spacing everywhere
//! else survive byte for byte.
//!
//! # Architecture
//!
//! ```text
//! DocumentStore::load → RuntimeDocument → mutator::apply → DocumentStore::save
//!                            │
//!                  lines (edited) + serde_yaml root (read back, checked)
//! ```
//!
//! Every edit is re-parsed and read back before it is accepted, so a layout
//! the line editor does not understand surfaces as an error instead of a
//! corrupted file.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod document;
pub mod error;
mod lines;
pub mod mutator;
pub mod path;
pub mod scalar;
pub mod store;

pub use document::RuntimeDocument;
pub use error::DocumentError;
pub use mutator::{apply, fields, planned_writes};
pub use path::FieldPath;
pub use scalar::ScalarValue;
pub use store::{DocumentStore, FileStore, MemoryStore};
