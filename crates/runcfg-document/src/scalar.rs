//! Scalar values and their YAML spelling

use serde_yaml::Value;
use std::fmt;

/// A value the mutator writes into the document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarValue {
    /// String scalar
    Text(String),
    /// Unsigned integer scalar
    Integer(u64),
}

impl ScalarValue {
    /// Create a text scalar
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Value as `serde_yaml` reads it back
    #[must_use]
    pub fn to_yaml(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Integer(n) => Value::Number((*n).into()),
        }
    }

    /// Spelling used on the edited line
    ///
    /// Text is written plain when YAML reads the plain form back as the same
    /// string (`yes`, `a1`, `linux-uniform.json`), single-quoted when it
    /// would not (`'1e5'`, `'true'`, `''`), and double-quoted with escapes
    /// when it holds control characters.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Text(text) if reads_back_plain(text) => text.clone(),
            Self::Text(text) if text.chars().any(char::is_control) => double_quoted(text),
            Self::Text(text) => format!("'{}'", text.replace('\'', "''")),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<u64> for ScalarValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<u8> for ScalarValue {
    fn from(value: u8) -> Self {
        Self::Integer(u64::from(value))
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn reads_back_plain(text: &str) -> bool {
    if text.is_empty() || text.contains(&['\n', '\r', '#'][..]) || text.trim() != text {
        return false;
    }
    matches!(serde_yaml::from_str::<Value>(text), Ok(Value::String(ref parsed)) if parsed == text)
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
