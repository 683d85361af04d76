//! Editable runtime document
//!
//! Keeps the file as lines and edits values in place. After every edit the
//! text is parsed again and compared against the previous tree with the one
//! field changed; any other difference rejects the edit.

use crate::error::DocumentError;
use crate::lines::{self, KeyLine, LineKind, INDENT_STEP};
use crate::path::FieldPath;
use crate::scalar::ScalarValue;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::ops::Range;

const ROOT: &str = "<root>";

/// A runtime document: original lines plus the parsed tree
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeDocument {
    lines: Vec<String>,
    trailing_newline: bool,
    crlf: bool,
    root: Value,
}

impl RuntimeDocument {
    /// Parse document text
    ///
    /// # Errors
    /// Returns error if the text is not a single YAML document whose root is
    /// a mapping
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let root = parse_root(text)?;
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);

        Ok(Self {
            lines: body.split('\n').map(str::to_owned).collect(),
            trailing_newline,
            crlf: text.contains("\r\n"),
            root,
        })
    }

    /// Parsed tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Value at a dotted path, `None` when absent or the path is malformed
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        FieldPath::parse(path).ok()?.lookup(&self.root)
    }

    /// Overwrite (or add) the scalar at a dotted path
    ///
    /// Only the line holding the field changes. A missing key is appended at
    /// the end of its parent block; missing parents are created with it.
    ///
    /// # Errors
    /// Returns error if the path is malformed, crosses a non-mapping, names a
    /// collection, sits in a layout the editor does not rewrite, or the
    /// edited text does not read back as expected. The document is unchanged
    /// on error.
    pub fn set(&mut self, path: &str, value: &ScalarValue) -> Result<(), DocumentError> {
        let field = FieldPath::parse(path)?;
        let mut edited = self.lines.clone();
        edit_lines(&mut edited, &field, &value.render(), self.line_ending())?;

        let mut expected = self.root.clone();
        set_in_tree(&mut expected, field.segments(), value.to_yaml());

        let text = join_lines(&edited, self.trailing_newline);
        let root = match parse_root(&text) {
            Ok(root) if root == expected => root,
            Ok(_) => return Err(DocumentError::EditRejected { path: field.to_string() }),
            Err(e) => {
                tracing::debug!("Edited document for '{}' failed to parse: {}", field, e);
                return Err(DocumentError::EditRejected { path: field.to_string() });
            }
        };

        self.lines = edited;
        self.root = root;
        Ok(())
    }

    /// Document text
    #[must_use]
    pub fn render(&self) -> String {
        join_lines(&self.lines, self.trailing_newline)
    }

    fn line_ending(&self) -> &'static str {
        if self.crlf {
            "\r"
        } else {
            ""
        }
    }
}

impl fmt::Display for RuntimeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn parse_root(text: &str) -> Result<Value, DocumentError> {
    let mut documents = Vec::new();
    for doc in serde_yaml::Deserializer::from_str(text) {
        documents.push(Value::deserialize(doc)?);
    }

    match documents.len() {
        0 => Err(DocumentError::Empty),
        1 => match documents.pop() {
            Some(root @ Value::Mapping(_)) => Ok(root),
            Some(Value::Null) | None => Err(DocumentError::Empty),
            Some(_) => Err(DocumentError::NotAMapping {
                path: ROOT.to_string(),
            }),
        },
        count => Err(DocumentError::MultiDocument { count }),
    }
}

fn join_lines(lines: &[String], trailing_newline: bool) -> String {
    let mut text = lines.join("\n");
    if trailing_newline {
        text.push('\n');
    }
    text
}

/// Expected tree after an edit
fn set_in_tree(node: &mut Value, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };

    if !node.is_mapping() {
        *node = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = node {
        let child = map
            .entry(Value::String(first.clone()))
            .or_insert(Value::Null);
        set_in_tree(child, rest, value);
    }
}

/// Apply one scalar edit to the line buffer
fn edit_lines(
    lines: &mut Vec<String>,
    field: &FieldPath,
    rendered: &str,
    eol: &str,
) -> Result<(), DocumentError> {
    let segments = field.segments();
    let mut scope = 0..lines.len();
    let mut default_indent = 0;
    let mut parent: Option<usize> = None;

    for (depth, segment) in segments.iter().enumerate() {
        let here = field.prefix(depth + 1);
        let indent = lines::first_content_indent(lines, scope.clone()).unwrap_or(default_indent);
        let parent_name = if depth == 0 {
            ROOT.to_string()
        } else {
            field.prefix(depth)
        };

        let Some((index, key_line)) =
            find_child(lines, scope.clone(), indent, segment, &parent_name)?
        else {
            let at = lines::last_content(lines, scope.clone())
                .or(parent)
                .map_or(scope.end, |i| i + 1);
            let added = missing_lines(&segments[depth..], indent, rendered, eol);
            tracing::trace!("Adding '{}' at line {}", field, at + 1);
            lines.splice(at..at, added);
            return Ok(());
        };

        let end = lines::block_end(lines, index + 1, indent, scope.end);
        let has_children = lines::last_content(lines, index + 1..end).is_some();
        let value = key_line.value_text(&lines[index]);

        if depth + 1 == segments.len() {
            check_leaf(&here, index, &key_line, value, has_children)?;
            let replaced = lines::replace_value(&lines[index], &key_line, rendered);
            lines[index] = replaced;
            return Ok(());
        }

        check_parent(&here, index, value)?;
        scope = index + 1..end;
        default_indent = indent + INDENT_STEP;
        parent = Some(index);
    }

    Ok(())
}

fn find_child(
    lines: &[String],
    scope: Range<usize>,
    indent: usize,
    key: &str,
    parent: &str,
) -> Result<Option<(usize, KeyLine)>, DocumentError> {
    let mut seen_key = false;

    for index in scope {
        let LineKind::Content { indent: line_indent } = lines::classify(&lines[index]) else {
            continue;
        };
        if line_indent != indent {
            continue;
        }

        let body = &lines::strip_cr(&lines[index]).0[indent..];
        if lines::is_sequence_entry(body) {
            if !seen_key {
                return Err(DocumentError::NotAMapping {
                    path: parent.to_string(),
                });
            }
            continue;
        }

        let Some(key_line) = lines::parse_key_line(&lines[index], indent) else {
            return Err(DocumentError::unsupported(
                parent,
                index,
                "expected a `key: value` line",
            ));
        };
        seen_key = true;
        if key_line.key == key {
            return Ok(Some((index, key_line)));
        }
    }

    Ok(None)
}

fn check_leaf(
    path: &str,
    index: usize,
    key_line: &KeyLine,
    value: &str,
    has_children: bool,
) -> Result<(), DocumentError> {
    if key_line.unterminated {
        return Err(DocumentError::unsupported(path, index, "multi-line quoted scalar"));
    }

    match value.as_bytes().first() {
        None if has_children => Err(DocumentError::NotScalar {
            path: path.to_string(),
        }),
        Some(b'{' | b'[') => Err(DocumentError::NotScalar {
            path: path.to_string(),
        }),
        Some(b'|' | b'>') => Err(DocumentError::unsupported(path, index, "block scalar")),
        Some(b'&' | b'*' | b'!') => Err(DocumentError::unsupported(
            path,
            index,
            "anchor, alias or tag",
        )),
        Some(_) if has_children => Err(DocumentError::unsupported(
            path,
            index,
            "multi-line plain scalar",
        )),
        None | Some(_) => Ok(()),
    }
}

fn check_parent(path: &str, index: usize, value: &str) -> Result<(), DocumentError> {
    match value.as_bytes().first() {
        None => Ok(()),
        Some(b'{') => Err(DocumentError::unsupported(path, index, "flow mapping")),
        Some(b'&' | b'!') => Err(DocumentError::unsupported(path, index, "anchor or tag")),
        Some(_) => Err(DocumentError::NotAMapping {
            path: path.to_string(),
        }),
    }
}

fn missing_lines(segments: &[String], indent: usize, rendered: &str, eol: &str) -> Vec<String> {
    segments
        .iter()
        .enumerate()
        .map(|(depth, segment)| {
            let pad = " ".repeat(indent + depth * INDENT_STEP);
            if depth + 1 == segments.len() {
                format!("{pad}{segment}: {rendered}{eol}")
            } else {
                format!("{pad}{segment}:{eol}")
            }
        })
        .collect()
}
