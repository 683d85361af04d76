//! Dotted field paths

use crate::error::DocumentError;
use serde_yaml::Value;
use std::fmt;

/// Path to a field in nested mappings, written `section.key`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path
    ///
    /// Segments are non-empty and limited to ASCII alphanumerics, `_` and
    /// `-`, so they are always valid plain YAML keys.
    ///
    /// # Errors
    /// [`DocumentError::InvalidPath`] for empty paths, empty segments or
    /// other characters
    pub fn parse(path: &str) -> Result<Self, DocumentError> {
        let invalid = |reason: String| DocumentError::InvalidPath {
            path: path.to_owned(),
            reason,
        };

        if path.is_empty() {
            return Err(invalid("empty path".to_string()));
        }

        let mut segments = Vec::new();
        for segment in path.split('.') {
            if segment.is_empty() {
                return Err(invalid("empty segment".to_string()));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(invalid(format!("invalid characters in segment: {segment}")));
            }
            segments.push(segment.to_owned());
        }

        Ok(Self { segments })
    }

    /// Path segments, outermost first
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dotted form of the first `depth` segments
    #[must_use]
    pub fn prefix(&self, depth: usize) -> String {
        self.segments[..depth.min(self.segments.len())].join(".")
    }

    /// Look the path up in a parsed YAML tree
    #[must_use]
    pub fn lookup<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let mut current = root;
        for segment in &self.segments {
            match current {
                Value::Mapping(map) => current = map.get(segment.as_str())?,
                _ => return None,
            }
        }
        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
