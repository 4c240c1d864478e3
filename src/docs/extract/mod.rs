//! Pattern-based extractors over component and demo source text.
//!
//! Each extractor is a pure function from text to a structured value. A
//! miss yields `None` or an empty collection; nothing here returns an error.
//!
//! The helpers in this module understand just enough JavaScript to stay out
//! of string literals and comments while matching brackets. They are not a
//! parser: regex literals and template-literal interpolation are treated as
//! plain text.

pub mod demo;
pub mod jsdoc;
pub mod subcomponents;
pub mod variants;

pub use demo::{extract_demo, DemoDocs, PropRow};
pub use jsdoc::{extract_doc_block, DocBlock, DocField};
pub use subcomponents::extract_sub_components;
pub use variants::{extract_all_variant_configs, extract_variant_config, VariantConfig};

use std::ops::ControlFlow;

/// Defines a function returning a lazily compiled, process-wide regex.
macro_rules! static_regex {
    ($(#[$meta:meta])* $name:ident, $pattern:expr) => {
        $(#[$meta])*
        fn $name() -> &'static regex::Regex {
            static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            RE.get_or_init(|| regex::Regex::new($pattern).expect("static pattern must compile"))
        }
    };
}
pub(crate) use static_regex;

/// Calls `visit` for every byte of `text` that lies outside string literals
/// and comments, until `visit` breaks.
fn scan_code(text: &str, mut visit: impl FnMut(usize, u8) -> ControlFlow<()>) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i += 2;
                continue;
            }
            _ => {}
        }
        if visit(i, bytes[i]).is_break() {
            return;
        }
        i += 1;
    }
}

/// Returns the index just past the string literal opening at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

const fn bracket_delta(b: u8) -> i32 {
    match b {
        b'{' | b'(' | b'[' => 1,
        b'}' | b')' | b']' => -1,
        _ => 0,
    }
}

/// Finds the bracket closing the one at byte index `open`.
///
/// All three bracket kinds count towards depth; brackets inside strings and
/// comments are ignored.
pub(crate) fn find_matching(text: &str, open: usize) -> Option<usize> {
    let tail = text.get(open..)?;
    if bracket_delta(*tail.as_bytes().first()?) != 1 {
        return None;
    }

    let mut depth = 0;
    let mut close = None;
    scan_code(tail, |i, b| {
        depth += bracket_delta(b);
        if depth == 0 {
            close = Some(open + i);
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });
    close
}

/// Returns the text between the bracket at `open` and its match.
pub(crate) fn bracket_body(text: &str, open: usize) -> Option<&str> {
    let close = find_matching(text, open)?;
    text.get(open + 1..close)
}

/// Splits `text` at every `sep` that is outside brackets, strings, and comments.
pub(crate) fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0;
    let mut start = 0;
    scan_code(text, |i, b| {
        depth += bracket_delta(b);
        if depth == 0 && b == sep {
            parts.push(&text[start..i]);
            start = i + 1;
        }
        ControlFlow::Continue(())
    });
    parts.push(&text[start..]);
    parts.retain(|p| !p.trim().is_empty());
    parts
}

/// Splits the body of an object literal into `(key, value)` pairs.
///
/// Quoted keys are unquoted. Shorthand entries get an empty value; spread
/// entries are skipped.
pub(crate) fn object_entries(body: &str) -> Vec<(String, &str)> {
    split_top_level(body, b',')
        .into_iter()
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.starts_with("...") {
                return None;
            }
            let mut colon = None;
            let mut depth = 0;
            scan_code(entry, |i, b| {
                depth += bracket_delta(b);
                if depth == 0 && b == b':' {
                    colon = Some(i);
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            });
            let (key, value) = match colon {
                Some(i) => (&entry[..i], entry[i + 1..].trim()),
                None => (entry, ""),
            };
            let key = key.trim();
            let key = unquote(key).unwrap_or(key);
            (!key.is_empty()).then(|| (key.to_string(), value))
        })
        .collect()
}

/// Strips one layer of matching `'`, `"`, or `` ` `` quotes.
pub(crate) fn unquote(text: &str) -> Option<&str> {
    let text = text.trim();
    let first = text.chars().next()?;
    if !matches!(first, '\'' | '"' | '`') || text.len() < 2 || !text.ends_with(first) {
        return None;
    }
    Some(&text[1..text.len() - 1])
}

/// Trims surrounding blank lines and removes the common leading indentation.
pub(crate) fn dedent(code: &str) -> String {
    let lines: Vec<&str> = code.trim_matches('\n').trim_end().lines().collect();
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| l.get(indent..).unwrap_or_else(|| l.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
