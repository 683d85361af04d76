//! Document persistence
//!
//! A store is loaded once and saved at most once per invocation. There is
//! no locking: two invocations against the same file race and the last
//! save wins.

use crate::document::RuntimeDocument;
use crate::error::DocumentError;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Source and sink of the runtime document
pub trait DocumentStore {
    /// Load the current document
    ///
    /// # Errors
    /// Returns error if the document cannot be read or parsed
    fn load(&self) -> Result<RuntimeDocument, DocumentError>;

    /// Persist `document`, replacing the stored one
    ///
    /// # Errors
    /// Returns error if the document cannot be written
    fn save(&self, document: &RuntimeDocument) -> Result<(), DocumentError>;
}

/// Document stored in a file
///
/// Saves write a sibling temporary file and rename it over the target, so
/// readers see either the old or the new document. The target's permissions
/// carry over to the replacement.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the document
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<RuntimeDocument, DocumentError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| DocumentError::io_error(&self.path, e))?;
        RuntimeDocument::parse(&text)
    }

    fn save(&self, document: &RuntimeDocument) -> Result<(), DocumentError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_error = |e| DocumentError::io_error(&self.path, e);

        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
        staged
            .write_all(document.render().as_bytes())
            .map_err(io_error)?;
        match std::fs::metadata(&self.path) {
            Ok(existing) => staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(io_error)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_error(e)),
        }
        staged.as_file().sync_all().map_err(io_error)?;
        staged
            .persist(&self.path)
            .map_err(|e| DocumentError::io_error(&self.path, e.error))?;

        tracing::debug!("Saved runtime document to {}", self.path.display());
        Ok(())
    }
}

/// In-memory document, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    text: String,
    saves: usize,
}

impl MemoryStore {
    /// Create a store holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                text: text.into(),
                saves: 0,
            }),
        }
    }

    /// Current text
    #[must_use]
    pub fn contents(&self) -> String {
        self.inner.lock().text.clone()
    }

    /// Number of completed saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.inner.lock().saves
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<RuntimeDocument, DocumentError> {
        RuntimeDocument::parse(&self.inner.lock().text)
    }

    fn save(&self, document: &RuntimeDocument) -> Result<(), DocumentError> {
        let mut inner = self.inner.lock();
        inner.text = document.render();
        inner.saves += 1;
        Ok(())
    }
}
