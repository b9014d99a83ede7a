//! Keyword locator — reserved words that get a `#define` alias.

use cob_core::{NameRegistry, SymbolTable};
use tracing::debug;

/// Register every vocabulary keyword that occurs anywhere in `source`.
///
/// Containment is a plain substring test; word boundaries are applied later
/// during substitution.
pub fn harvest<S: AsRef<str>>(source: &str, vocabulary: &[S], names: &mut NameRegistry) -> SymbolTable {
    let mut table = SymbolTable::new();
    for keyword in vocabulary {
        let keyword = keyword.as_ref();
        if !keyword.is_empty() && source.contains(keyword) {
            table.insert(keyword.to_string(), names.generate());
        }
    }
    debug!(count = table.len(), "located keywords");
    table
}
