//! Substitution engine — rewrites the buffer one category at a time.
//!
//! Each category pass sees the text left by the previous one, so the order in
//! [`Category::SUBSTITUTION_ORDER`] is part of the output contract.

use cob_core::{Category, Mappings, SymbolTable};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use tracing::debug;

/// Characters that may follow a function name for it to count as a use.
const FUNCTION_FOLLOWERS: &[char] = &['(', ' '];

/// Rewritten text plus the number of occurrences replaced.
#[derive(Debug, Clone, Default)]
pub struct Pass {
    pub text: String,
    pub replaced: usize,
}

/// Text between `from` and the next `;`, or the rest of the buffer.
fn until_semicolon(buffer: &str, from: usize) -> &str {
    let rest = &buffer[from..];
    rest.find(';').map_or(rest, |i| &rest[..i])
}

fn word_regex(symbol: &str) -> Option<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(symbol))).ok()
}

/// Splice `replacement` over each accepted `(start, end)` span.
fn splice<I, F>(buffer: &str, spans: I, replacement: &str, mut accept: F) -> Pass
where
    I: IntoIterator<Item = (usize, usize)>,
    F: FnMut(usize, usize) -> bool,
{
    let mut text = String::with_capacity(buffer.len());
    let mut last = 0;
    let mut replaced = 0;
    for (start, end) in spans {
        if !accept(start, end) {
            continue;
        }
        text.push_str(&buffer[last..start]);
        text.push_str(replacement);
        last = end;
        replaced += 1;
    }
    text.push_str(&buffer[last..]);
    Pass { text, replaced }
}

/// Whole-word replacement guarded by a look-ahead to the next `;`: an
/// occurrence whose look-ahead contains `marker` is treated as string
/// content and left alone.
fn replace_guarded(buffer: &str, symbol: &str, opaque: &str, marker: &str) -> Pass {
    let Some(re) = word_regex(symbol) else {
        return Pass { text: buffer.to_string(), replaced: 0 };
    };
    let spans: Vec<(usize, usize)> = re.find_iter(buffer).map(|m| (m.start(), m.end())).collect();
    splice(buffer, spans, opaque, |_, end| !until_semicolon(buffer, end).contains(marker))
}

/// Variables: whole-word, skipped when `")` lies before the next `;`.
pub fn rename_variables(buffer: &str, table: &SymbolTable) -> Pass {
    let mut text = buffer.to_string();
    let mut replaced = 0;
    for (symbol, opaque) in table {
        let pass = replace_guarded(&text, symbol, opaque, "\")");
        text = pass.text;
        replaced += pass.replaced;
    }
    Pass { text, replaced }
}

/// Macros: whole-word, unconditional. The `#define` line itself is renamed too.
pub fn rename_macros(buffer: &str, table: &SymbolTable) -> Pass {
    let mut text = buffer.to_string();
    let mut replaced = 0;
    for (symbol, opaque) in table {
        if let Some(re) = word_regex(symbol) {
            let spans: Vec<(usize, usize)> = re.find_iter(&text).map(|m| (m.start(), m.end())).collect();
            let pass = splice(&text, spans, opaque, |_, _| true);
            text = pass.text;
            replaced += pass.replaced;
        }
    }
    Pass { text, replaced }
}

/// Keywords: whole-word, skipped when a `"` lies before the next `;`. Each
/// keyword then gets `#define <opaque> <keyword>` prepended, so later
/// keywords' aliases end up above earlier ones.
pub fn rename_keywords(buffer: &str, table: &SymbolTable) -> Pass {
    let mut text = buffer.to_string();
    let mut replaced = 0;
    for (keyword, opaque) in table {
        let pass = replace_guarded(&text, keyword, opaque, "\"");
        replaced += pass.replaced;
        text = format!("#define {opaque} {keyword}\n{}", pass.text);
    }
    Pass { text, replaced }
}

/// Raw substring occurrences of `name` followed by `(` or a space.
///
/// Nothing is checked before the match, and a name that is a prefix of a
/// longer identifier is skipped rather than resolved.
fn replace_function(buffer: &str, name: &str, opaque: &str) -> Pass {
    if name.is_empty() {
        return Pass { text: buffer.to_string(), replaced: 0 };
    }
    let spans = buffer.match_indices(name).map(|(i, m)| (i, i + m.len()));
    splice(buffer, spans, opaque, |_, end| {
        buffer[end..].starts_with(FUNCTION_FOLLOWERS)
    })
}

pub fn rename_local_functions(buffer: &str, table: &SymbolTable) -> Pass {
    let mut text = buffer.to_string();
    let mut replaced = 0;
    for (name, opaque) in table {
        let pass = replace_function(&text, name, opaque);
        text = pass.text;
        replaced += pass.replaced;
    }
    Pass { text, replaced }
}

/// Library functions are renamed like local ones, and every function that
/// was actually replaced gets a `#define <opaque> <name>` alias. The aliases
/// are prepended one by one after the whole category, in first-use order.
pub fn rename_library_functions(buffer: &str, table: &SymbolTable) -> Pass {
    let mut text = buffer.to_string();
    let mut replaced = 0;
    let mut aliases: IndexSet<String> = IndexSet::new();
    for (name, opaque) in table {
        let pass = replace_function(&text, name, opaque);
        if pass.replaced > 0 {
            aliases.insert(format!("#define {opaque} {name}\n"));
        }
        text = pass.text;
        replaced += pass.replaced;
    }
    for alias in aliases {
        text.insert_str(0, &alias);
    }
    Pass { text, replaced }
}

/// Outcome of a full substitution run.
#[derive(Debug, Clone, Default)]
pub struct Substituted {
    pub text: String,
    pub replaced: IndexMap<Category, usize>,
}

/// Apply every category in substitution order.
pub fn apply(source: &str, mappings: &Mappings) -> Substituted {
    let mut text = source.to_string();
    let mut replaced = IndexMap::new();
    for category in Category::SUBSTITUTION_ORDER {
        let table = mappings.table(category);
        let pass = match category {
            Category::Variable => rename_variables(&text, table),
            Category::Macro => rename_macros(&text, table),
            Category::Keyword => rename_keywords(&text, table),
            Category::LocalFunction => rename_local_functions(&text, table),
            Category::LibraryFunction => rename_library_functions(&text, table),
        };
        debug!(category = category.as_str(), replaced = pass.replaced, "substituted");
        replaced.insert(category, pass.replaced);
        text = pass.text;
    }
    Substituted { text, replaced }
}
