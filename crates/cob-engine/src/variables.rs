//! Variable harvester — declaration-shaped text after type/qualifier keywords.

use cob_core::{NameRegistry, SymbolTable};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static RE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    r"\b(?:(?:auto\s*|const\s*|unsigned\s*|signed\s*|register\s*|volatile\s*|static\s*|void\s*|short\s*|long\s*|char\s*|int\s*|float\s*|double\s*|_Bool\s*|complex\s*)+)(?:\s+\*?\*?\s*)([a-zA-Z_][a-zA-Z0-9_]*)\s*[\[;,=)]"
).unwrap());
static RE_IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Names declared after the first declarator of a comma-terminated match.
///
/// Scans from the comma up to the next `;` (or end of text), strips any
/// `= initializer` and pointer stars from each piece, and keeps the pieces
/// that are plain identifiers.
pub fn trailing_declarators(source: &str, comma_at: usize) -> Vec<String> {
    let end = source[comma_at..]
        .find(';')
        .map(|i| comma_at + i)
        .unwrap_or(source.len());
    let mut names = Vec::new();
    for piece in source[comma_at..end].split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let bare = piece
            .split_once('=')
            .map_or(piece, |(name, _)| name)
            .trim()
            .trim_start_matches('*')
            .trim();
        if RE_IDENT.is_match(bare) {
            names.push(bare.to_string());
        } else {
            warn!(piece, "skipping declarator that is not a plain identifier");
        }
    }
    names
}

/// Every variable name the declaration pattern finds, in source order.
pub fn find(source: &str) -> Vec<String> {
    let mut found = Vec::new();
    for caps in RE_DECLARATION.captures_iter(source) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else { continue };
        if whole.as_str().ends_with(',') {
            found.extend(trailing_declarators(source, whole.end() - 1));
        }
        found.push(name.as_str().to_string());
    }
    found
}

/// Harvest variables into a table, each registration drawing a fresh name.
pub fn harvest(source: &str, names: &mut NameRegistry) -> SymbolTable {
    let mut table = SymbolTable::new();
    for var in find(source) {
        table.insert(var, names.generate());
    }
    debug!(count = table.len(), "harvested variables");
    table
}
