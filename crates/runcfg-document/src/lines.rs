//! Line scanner for block-style YAML
//!
//! Just enough structure to find `key: value` lines by indentation and to
//! split a line into key, value and trailing comment. Anything richer is
//! left to `serde_yaml`, which re-reads every edit.

use std::ops::Range;

/// Indentation added for each new nesting level
pub(crate) const INDENT_STEP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Blank,
    Comment,
    /// `---`, `...` or a `%` directive
    Marker,
    Content {
        indent: usize,
    },
}

/// Split off a trailing `\r` left by CRLF line endings
pub(crate) fn strip_cr(line: &str) -> (&str, &str) {
    match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    }
}

pub(crate) fn classify(line: &str) -> LineKind {
    let (line, _) = strip_cr(line);
    let content = line.trim_start_matches(' ');
    let indent = line.len() - content.len();

    if content.trim().is_empty() {
        LineKind::Blank
    } else if content.starts_with('#') {
        LineKind::Comment
    } else if indent == 0 && is_marker(line) {
        LineKind::Marker
    } else {
        LineKind::Content { indent }
    }
}

fn is_marker(line: &str) -> bool {
    if line.starts_with('%') {
        return true;
    }
    matches!(line.get(..3), Some("---" | "..."))
        && line[3..].chars().next().map_or(true, char::is_whitespace)
}

/// `- item` or a bare `-`
pub(crate) fn is_sequence_entry(body: &str) -> bool {
    body == "-" || body.starts_with("- ")
}

/// A `key: value  # comment` line, offsets relative to the line without `\r`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyLine {
    pub(crate) key: String,
    pub(crate) colon: usize,
    /// Empty when nothing follows the colon except an optional comment
    pub(crate) value: Range<usize>,
    pub(crate) comment: Option<usize>,
    /// Quoted value whose closing quote is on a later line
    pub(crate) unterminated: bool,
}

impl KeyLine {
    pub(crate) fn value_text<'l>(&self, line: &'l str) -> &'l str {
        &strip_cr(line).0[self.value.clone()]
    }
}

/// Parse a mapping entry whose key starts at `indent`
pub(crate) fn parse_key_line(line: &str, indent: usize) -> Option<KeyLine> {
    let (line, _) = strip_cr(line);
    let body = line.get(indent..)?;

    let (key, key_len) = match *body.as_bytes().first()? {
        quote @ (b'\'' | b'"') => {
            let close = closing_quote(body, 0)?;
            let inner = &body[1..close];
            let key = if quote == b'\'' {
                inner.replace("''", "'")
            } else {
                inner.to_owned()
            };
            (key, close + 1)
        }
        b'{' | b'[' | b'?' | b'&' | b'*' | b'!' | b'|' | b'>' => return None,
        _ => {
            let end = plain_key_end(body)?;
            let key = body[..end].trim_end();
            if key.is_empty() {
                return None;
            }
            (key.to_owned(), end)
        }
    };

    let after = &body[key_len..];
    let colon_rel = key_len + (after.len() - after.trim_start_matches(' ').len());
    if body.as_bytes().get(colon_rel) != Some(&b':') {
        return None;
    }
    if !matches!(body.as_bytes().get(colon_rel + 1), None | Some(b' ' | b'\t')) {
        return None;
    }

    let colon = indent + colon_rel;
    let (value, comment, unterminated) = scan_value(line, colon + 1);
    Some(KeyLine {
        key,
        colon,
        value,
        comment,
        unterminated,
    })
}

fn plain_key_end(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b':' if matches!(bytes.get(i + 1), None | Some(b' ' | b'\t')) => return Some(i),
            b'#' if i > 0 && matches!(bytes[i - 1], b' ' | b'\t') => return None,
            _ => {}
        }
    }
    None
}

fn scan_value(line: &str, from: usize) -> (Range<usize>, Option<usize>, bool) {
    let rest = &line[from..];
    let padding = rest.len() - rest.trim_start_matches(|c: char| c == ' ' || c == '\t').len();
    let start = from + padding;

    match line.as_bytes().get(start) {
        None => (from..from, None, false),
        Some(b'#') => (from..from, Some(start), false),
        Some(b'\'' | b'"') => match closing_quote(line, start) {
            Some(close) => (start..close + 1, find_comment(line, close + 1), false),
            None => (start..line.trim_end().len(), None, true),
        },
        Some(_) => {
            let comment = find_comment(line, start);
            let end = start + line[start..comment.unwrap_or(line.len())].trim_end().len();
            (start..end, comment, false)
        }
    }
}

/// First `#` preceded by whitespace at or after `from`
fn find_comment(line: &str, from: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    (from.max(1)..bytes.len()).find(|&i| bytes[i] == b'#' && matches!(bytes[i - 1], b' ' | b'\t'))
}

/// Index of the quote closing the one at `open`
fn closing_quote(s: &str, open: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if quote == b'"' => i += 2,
            b'\'' if quote == b'\'' && bytes.get(i + 1) == Some(&b'\'') => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Rewrite the value of a key line, keeping indentation and comment
pub(crate) fn replace_value(line: &str, key_line: &KeyLine, rendered: &str) -> String {
    let (body, cr) = strip_cr(line);
    let mut out = String::with_capacity(body.len() + rendered.len() + 2);
    out.push_str(&body[..=key_line.colon]);
    out.push(' ');
    out.push_str(rendered);
    if key_line.value.is_empty() {
        if let Some(comment) = key_line.comment {
            out.push(' ');
            out.push_str(&body[comment..]);
        }
    } else {
        out.push_str(&body[key_line.value.end..]);
    }
    out.push_str(cr);
    out
}

/// End (exclusive) of the block owned by a key line at `indent`
///
/// Compact sequences (`key:` followed by `- item` at the same indent) belong
/// to the key.
pub(crate) fn block_end(lines: &[String], from: usize, indent: usize, limit: usize) -> usize {
    (from..limit)
        .find(|&i| match classify(&lines[i]) {
            LineKind::Content { indent: inner } => {
                inner < indent
                    || (inner == indent && !is_sequence_entry(&strip_cr(&lines[i]).0[inner..]))
            }
            LineKind::Marker => true,
            LineKind::Blank | LineKind::Comment => false,
        })
        .unwrap_or(limit)
}

pub(crate) fn first_content_indent(lines: &[String], range: Range<usize>) -> Option<usize> {
    lines[range].iter().find_map(|line| match classify(line) {
        LineKind::Content { indent } => Some(indent),
        _ => None,
    })
}

pub(crate) fn last_content(lines: &[String], range: Range<usize>) -> Option<usize> {
    range
        .rev()
        .find(|&i| matches!(classify(&lines[i]), LineKind::Content { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_owned).collect()
    }

    #[test]
    fn classify_lines() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("  # note"), LineKind::Comment);
        assert_eq!(classify("---"), LineKind::Marker);
        assert_eq!(classify("%YAML 1.2"), LineKind::Marker);
        assert_eq!(classify("---x: 1"), LineKind::Content { indent: 0 });
        assert_eq!(classify("    enable: yes\r"), LineKind::Content { indent: 4 });
    }

    #[test]
    fn key_line_plain_with_comment() {
        let line = "  selector: 2   # 0 = always";
        let kl = parse_key_line(line, 2).unwrap();
        assert_eq!(kl.key, "selector");
        assert_eq!(kl.value_text(line), "2");
        assert_eq!(&line[kl.comment.unwrap()..], "# 0 = always");
    }

    #[test]
    fn key_line_without_value() {
        let line = "tracing:";
        let kl = parse_key_line(line, 0).unwrap();
        assert_eq!(kl.key, "tracing");
        assert!(kl.value.is_empty());
        assert_eq!(kl.comment, None);

        let line = "tracing:   # TracerV";
        let kl = parse_key_line(line, 0).unwrap();
        assert!(kl.value.is_empty());
        assert_eq!(kl.comment, Some(11));
    }

    #[test]
    fn key_line_quoted_value_with_hash() {
        let line = r#"  name: "a # b" # real"#;
        let kl = parse_key_line(line, 2).unwrap();
        assert_eq!(kl.value_text(line), r#""a # b""#);
        assert_eq!(&line[kl.comment.unwrap()..], "# real");
    }

    #[test]
    fn key_line_quoted_key() {
        let kl = parse_key_line("'it''s': 1", 0).unwrap();
        assert_eq!(kl.key, "it's");
        let kl = parse_key_line("\"start\" : 5", 0).unwrap();
        assert_eq!(kl.key, "start");
    }

    #[test]
    fn key_line_rejects_non_entries() {
        assert_eq!(parse_key_line("http://x", 0), None);
        assert_eq!(parse_key_line("{a: 1}", 0), None);
        assert_eq!(parse_key_line("just text # a: b", 0), None);
    }

    #[test]
    fn unterminated_quote_flagged() {
        let kl = parse_key_line("start: 'abc", 0).unwrap();
        assert!(kl.unterminated);
    }

    #[test]
    fn replace_keeps_comment_and_spacing() {
        let line = "    read_rate: 0      # sampling interval";
        let kl = parse_key_line(line, 4).unwrap();
        assert_eq!(
            replace_value(line, &kl, "100"),
            "    read_rate: 100      # sampling interval"
        );
    }

    #[test]
    fn replace_fills_empty_value() {
        let line = "  start:  # window\r";
        let kl = parse_key_line(line, 2).unwrap();
        assert_eq!(replace_value(line, &kl, "a1"), "  start: a1 # window\r");
    }

    #[test]
    fn block_end_by_indent() {
        let doc = lines("tracing:\n  enable: no\n\n  # c\n  start: 0\nworkload:\n  name: x\n");
        assert_eq!(block_end(&doc, 1, 0, doc.len()), 5);
        assert_eq!(last_content(&doc, 1..5), Some(4));
        assert_eq!(first_content_indent(&doc, 1..5), Some(2));
    }

    #[test]
    fn block_end_keeps_compact_sequence() {
        let doc = lines("items:\n- a\n- b\nnext: 1\n");
        assert_eq!(block_end(&doc, 1, 0, doc.len()), 3);
    }
}
