//! Whitespace compactor — joins lines and collapses whitespace runs.

use regex::Regex;
use std::sync::LazyLock;

static RE_MULTI_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\s+").unwrap());

fn collapse(text: &str) -> String {
    RE_MULTI_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Join all non-empty lines without separators. Lines starting with `#`
/// stay on a line of their own. Runs of two or more whitespace characters
/// become one space; directive line breaks are never folded into a run.
pub fn compact(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = String::new();
    for line in text.split(['\n', '\r']).filter(|l| !l.is_empty()) {
        if !line.starts_with('#') {
            pending.push_str(line);
            continue;
        }
        if !pending.trim().is_empty() {
            out.push_str(&collapse(&pending));
            out.push('\n');
        }
        pending.clear();
        out.push_str(&collapse(line));
        out.push('\n');
    }
    if !pending.trim().is_empty() {
        out.push_str(&collapse(&pending));
    }
    out
}
