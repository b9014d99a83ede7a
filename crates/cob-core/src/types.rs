use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Symbol category. Declaration order is the substitution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Variable,
    Macro,
    Keyword,
    LocalFunction,
    LibraryFunction,
}

impl Category {
    pub const SUBSTITUTION_ORDER: [Category; 5] = [
        Category::Variable,
        Category::Macro,
        Category::Keyword,
        Category::LocalFunction,
        Category::LibraryFunction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Macro => "macro",
            Self::Keyword => "keyword",
            Self::LocalFunction => "local_function",
            Self::LibraryFunction => "library_function",
        }
    }
}

/// Symbol → opaque name, in extraction order. Re-inserting a symbol keeps
/// its position and takes the newer name.
pub type SymbolTable = IndexMap<String, String>;

/// Replacement tables for one run, one per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mappings {
    pub variables: SymbolTable,
    pub macros: SymbolTable,
    pub keywords: SymbolTable,
    pub local_functions: SymbolTable,
    pub library_functions: SymbolTable,
}

impl Mappings {
    pub fn table(&self, category: Category) -> &SymbolTable {
        match category {
            Category::Variable => &self.variables,
            Category::Macro => &self.macros,
            Category::Keyword => &self.keywords,
            Category::LocalFunction => &self.local_functions,
            Category::LibraryFunction => &self.library_functions,
        }
    }

    pub fn table_mut(&mut self, category: Category) -> &mut SymbolTable {
        match category {
            Category::Variable => &mut self.variables,
            Category::Macro => &mut self.macros,
            Category::Keyword => &mut self.keywords,
            Category::LocalFunction => &mut self.local_functions,
            Category::LibraryFunction => &mut self.library_functions,
        }
    }

    pub fn len(&self) -> usize {
        Category::SUBSTITUTION_ORDER.iter().map(|c| self.table(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every opaque name across all categories.
    pub fn opaque_names(&self) -> impl Iterator<Item = &str> {
        Category::SUBSTITUTION_ORDER
            .into_iter()
            .flat_map(move |c| self.table(c).values().map(String::as_str))
    }
}

/// One function declaration reported by the signature lister.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Declaration text, e.g. `extern int printf (const char *, ...);`.
    pub declaration: String,
    /// File the declaration was seen in.
    pub origin: PathBuf,
}

impl Signature {
    pub fn new(declaration: impl Into<String>, origin: impl Into<PathBuf>) -> Self {
        Self { declaration: declaration.into(), origin: origin.into() }
    }

    /// Whether this declaration comes from `source` itself.
    pub fn is_declared_in(&self, source: &Path) -> bool {
        if self.origin.as_os_str().is_empty() {
            return false;
        }
        self.origin == source || self.origin.ends_with(source) || source.ends_with(&self.origin)
    }
}
