//! C obfuscation engine — textual symbol harvesting and renaming.
//!
//! Passes:
//! 1. Variable harvester (declaration patterns)
//! 2. Keyword locator (closed vocabulary, aliased via `#define`)
//! 3. Define harvester (`#define` names)
//! 4. Function classifier (local vs library, from a signature listing)
//! 5. Substitution engine (category-ordered rewrite)
//! 6. Whitespace compactor

pub mod compact;
pub mod defines;
pub mod functions;
pub mod keywords;
pub mod pipeline;
pub mod substitute;
pub mod variables;

pub use pipeline::{ObfuscationReport, Obfuscated, Obfuscator};
