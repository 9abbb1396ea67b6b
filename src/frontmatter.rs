//! Front matter extraction for book and note documents.
//!
//! Documents open with a `---` delimited header of `key: value` lines,
//! followed by the markdown body. The header grammar is a deliberately small
//! YAML-ish subset (scalars, bracketed lists, and a `progress` object in
//! inline or multi-line form), parsed with an explicit line-oriented state
//! machine rather than a YAML library.
//!
//! Unknown or malformed header lines never abort parsing; they are skipped so
//! documents written for a newer grammar still load.

use crate::error::DataError;
use std::collections::{BTreeMap, HashMap};

/// Key/value pairs of a `progress` object.
///
/// `BTreeMap` keeps iteration deterministic for serialization and tests.
pub type ProgressMap = BTreeMap<String, ProgressValue>;

/// A value inside a `progress` object.
///
/// The progress paths use a loose integer-or-decimal coercion, unlike plain
/// scalars which only coerce pure digit runs. That asymmetry is part of the
/// documented format.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressValue {
    Num(f64),
    Str(String),
}

impl ProgressValue {
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

/// A parsed header attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    List(Vec<String>),
    Progress(ProgressMap),
}

impl AttributeValue {
    /// Text form of a scalar attribute. Integers stringify so that
    /// `title: 1984` still displays as a title.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::List(_) | Self::Progress(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_progress(&self) -> Option<&ProgressMap> {
        match self {
            Self::Progress(map) => Some(map),
            _ => None,
        }
    }
}

/// Result of a successful front matter extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub attributes: HashMap<String, AttributeValue>,
    /// Everything after the closing delimiter line, byte-for-byte.
    pub body: String,
}

/// Scanner state while walking header lines.
enum ScanState {
    Header,
    ProgressBlock,
}

/// Extract the front matter header and body from a document.
///
/// The document must begin (after optional leading whitespace) with a line of
/// exactly three hyphens, and contain a second such line closing the header.
/// Anything else is [`DataError::MalformedFrontMatter`].
pub fn extract_front_matter(text: &str) -> Result<FrontMatter, DataError> {
    let lead = text.len() - text.trim_start().len();
    let rest = &text[lead..];

    let (first, mut cursor) = next_line(rest, 0);
    if !is_delimiter(first) {
        return Err(DataError::MalformedFrontMatter);
    }

    let mut header_lines: Vec<&str> = Vec::new();
    let mut body_start = None;
    while cursor < rest.len() {
        let (line, next) = next_line(rest, cursor);
        if is_delimiter(line) {
            body_start = Some(next);
            break;
        }
        header_lines.push(line);
        cursor = next;
    }
    let body_start = body_start.ok_or(DataError::MalformedFrontMatter)?;

    Ok(FrontMatter {
        attributes: parse_header(&header_lines),
        body: rest[body_start..].to_string(),
    })
}

/// Interpret header lines in order. Later writes win on repeated keys.
fn parse_header(lines: &[&str]) -> HashMap<String, AttributeValue> {
    let mut attributes = HashMap::new();
    let mut state = ScanState::Header;

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let ScanState::ProgressBlock = state {
            if line.starts_with('}') {
                state = ScanState::Header;
                continue;
            }
            if let Some((key, value)) = split_key_value(line)
                && let Some(AttributeValue::Progress(map)) = attributes.get_mut("progress")
            {
                map.insert(key.to_string(), coerce_progress(value));
            }
            continue;
        }

        if is_progress_open(line) {
            attributes.insert("progress".to_string(), AttributeValue::Progress(ProgressMap::new()));
            state = ScanState::ProgressBlock;
            continue;
        }
        if let Some(interior) = inline_progress(line) {
            attributes.insert(
                "progress".to_string(),
                AttributeValue::Progress(parse_inline_pairs(interior)),
            );
            continue;
        }
        if let Some((key, items)) = bracketed_list(line) {
            attributes.insert(key.to_string(), AttributeValue::List(items));
            continue;
        }
        if let Some((key, value)) = split_key_value(line) {
            attributes.insert(key.to_string(), coerce_scalar(value));
        }
        // anything else: ignored for forward compatibility
    }

    attributes
}

/// Return the line starting at `at` (without its newline) and the offset of
/// the next line.
fn next_line(text: &str, at: usize) -> (&str, usize) {
    match text[at..].find('\n') {
        Some(i) => (text[at..at + i].trim_end_matches('\r'), at + i + 1),
        None => (&text[at..], text.len()),
    }
}

/// A delimiter line is `---` followed only by whitespace.
fn is_delimiter(line: &str) -> bool {
    line.strip_prefix("---")
        .is_some_and(|rest| rest.trim().is_empty())
}

/// `progress:` or `progress: {` with nothing else opens a multi-line block.
fn is_progress_open(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("progress") else {
        return false;
    };
    let Some(rest) = rest.trim_start().strip_prefix(':') else {
        return false;
    };
    let rest = rest.trim_start();
    rest.is_empty() || rest == "{"
}

/// `progress: { ... }` on one line; returns the brace interior.
fn inline_progress(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("progress")?.trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let interior = rest.strip_prefix('{')?.strip_suffix('}')?;
    if interior.is_empty() { None } else { Some(interior) }
}

/// Split `key: value` where the key is `[A-Za-z0-9_]+` and the value is
/// non-empty. Returns `None` for anything else.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let key = line[..colon].trim_end();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let value = line[colon + 1..].trim_start();
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// `key: [a, b, c]` bracketed list with optional quoting per element.
fn bracketed_list(line: &str) -> Option<(&str, Vec<String>)> {
    let (key, value) = split_key_value(line)?;
    let interior = value.strip_prefix('[')?.strip_suffix(']')?;
    let items = interior
        .split(',')
        .map(|item| strip_quotes(item.trim()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    Some((key, items))
}

/// Strip at most one leading and one trailing quote, single or double,
/// independently (a mismatched pair still strips both ends).
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['\'', '"']).unwrap_or(s);
    s.strip_suffix(['\'', '"']).unwrap_or(s)
}

/// Inline progress interior: comma-separated `k: v` pairs, split on the
/// first colon of each segment.
fn parse_inline_pairs(interior: &str) -> ProgressMap {
    let mut map = ProgressMap::new();
    for pair in interior.split(',') {
        let Some((key, value)) = pair.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        map.insert(key.to_string(), coerce_progress(value.trim()));
    }
    map
}

/// Loose integer-or-decimal coercion used by both progress paths.
fn coerce_progress(value: &str) -> ProgressValue {
    if is_loose_number(value)
        && let Ok(n) = value.parse::<f64>()
    {
        return ProgressValue::Num(n);
    }
    ProgressValue::Str(value.to_string())
}

/// Strict coercion for plain scalars: integers only when the value is a pure
/// digit run, otherwise a trimmed string.
fn coerce_scalar(value: &str) -> AttributeValue {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
        && let Ok(n) = value.parse::<i64>()
    {
        return AttributeValue::Int(n);
    }
    AttributeValue::Str(value.to_string())
}

/// Matches `-?\d+(\.\d+)?`.
fn is_loose_number(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}
