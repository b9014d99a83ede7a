//! Define harvester — object-like macro names from `#define` lines.

use cob_core::{NameRegistry, SymbolTable};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// A `#define` that follows a line terminator; the first line of the text
/// is never considered.
static RE_DEFINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    r"[\n\r][^\n\r]*?#define[ \t]+([^\n\r]*)"
).unwrap());

/// Macro name from the text following `#define`: the first space-separated
/// token, cut at the first character that cannot continue a C identifier
/// (so `SQ(x)` yields `SQ`).
fn macro_name(rest: &str) -> Option<&str> {
    let token = rest.split([' ', '\t']).next()?;
    let end = token
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(token.len());
    let name = &token[..end];
    let starts_ok = name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_');
    starts_ok.then_some(name)
}

/// Macro names in source order.
pub fn find(source: &str) -> Vec<String> {
    RE_DEFINE
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .filter_map(|rest| macro_name(rest.as_str()))
        .map(str::to_string)
        .collect()
}

pub fn harvest(source: &str, names: &mut NameRegistry) -> SymbolTable {
    let mut table = SymbolTable::new();
    for name in find(source) {
        table.insert(name, names.generate());
    }
    debug!(count = table.len(), "harvested macros");
    table
}
