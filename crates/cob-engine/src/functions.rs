//! Function classifier — splits compiler-reported declarations into local
//! and library functions.

use cob_core::{NameRegistry, Signature, SymbolTable};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Program entry point; always aliased back through `#define`.
pub const ENTRY_POINT: &str = "main";

static RE_EXTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"extern\s(.*?)\s\(").unwrap());

/// Function name declared by `declaration`: the last token before the
/// parameter list, pointer stars removed.
pub fn function_name(declaration: &str) -> Option<String> {
    let head = RE_EXTERN.captures(declaration)?.get(1)?.as_str();
    let name = head.split_whitespace().last()?.trim_start_matches('*');
    (!name.is_empty()).then(|| name.to_string())
}

/// Local and library function tables.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub local: SymbolTable,
    pub library: SymbolTable,
}

/// Partition signatures by origin. `main` never stays local; it is always
/// registered as a library alias.
pub fn classify(signatures: &[Signature], source: &Path, names: &mut NameRegistry) -> Classified {
    let mut out = Classified::default();
    for sig in signatures {
        let Some(name) = function_name(&sig.declaration) else { continue };
        let table = if sig.is_declared_in(source) { &mut out.local } else { &mut out.library };
        table.insert(name, names.generate());
    }
    out.local.shift_remove(ENTRY_POINT);
    out.library.insert(ENTRY_POINT.to_string(), names.generate());
    debug!(local = out.local.len(), library = out.library.len(), "classified functions");
    out
}
