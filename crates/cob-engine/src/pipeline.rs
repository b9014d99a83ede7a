//! Obfuscation pipeline — sequences the external collaborators, the
//! harvesters, the substitution engine and the compactor.

use crate::{compact, defines, functions, keywords, substitute, variables};
use chrono::{DateTime, Utc};
use cob_core::config::EngineConfig;
use cob_core::{
    Category, CobError, Mappings, NameRegistry, Result, SeedProvider, Signature, SignatureLister,
    SourceProvider,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// In-memory result of one obfuscation.
#[derive(Debug, Clone)]
pub struct Obfuscated {
    pub text: String,
    pub mappings: Mappings,
    /// Occurrences replaced per category.
    pub replaced: IndexMap<Category, usize>,
}

/// Summary of a completed run, written out by `--emit-map`.
#[derive(Debug, Clone, Serialize)]
pub struct ObfuscationReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub seed: u32,
    pub generated_at: DateTime<Utc>,
    pub symbols: IndexMap<Category, usize>,
    pub replaced: IndexMap<Category, usize>,
    pub mappings: Mappings,
}

/// `<stem><seed>.<ext>` next to `input`.
pub fn output_path(input: &Path, seed: u32) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CobError::MissingArgument(format!("{} has no file name", input.display())))?;
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}{seed}.{ext}"),
        None => format!("{stem}{seed}"),
    };
    Ok(input.with_file_name(name))
}

/// Variables, keywords and macros from a comment-stripped snapshot.
pub fn harvest_source<S: AsRef<str>>(source: &str, vocabulary: &[S], names: &mut NameRegistry) -> Mappings {
    Mappings {
        variables: variables::harvest(source, names),
        keywords: keywords::harvest(source, vocabulary, names),
        macros: defines::harvest(source, names),
        ..Mappings::default()
    }
}

pub struct Obfuscator {
    source: Arc<dyn SourceProvider>,
    signatures: Arc<dyn SignatureLister>,
    seed: Arc<dyn SeedProvider>,
    engine: EngineConfig,
    rng_seed: Option<u64>,
}

impl Obfuscator {
    pub fn new(
        source: Arc<dyn SourceProvider>,
        signatures: Arc<dyn SignatureLister>,
        seed: Arc<dyn SeedProvider>,
    ) -> Self {
        Self { source, signatures, seed, engine: EngineConfig::default(), rng_seed: None }
    }

    pub fn with_engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Reproducible opaque names.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    fn registry(&self) -> NameRegistry {
        self.rng_seed.map_or_else(NameRegistry::new, NameRegistry::with_seed)
    }

    fn rewrite(&self, source: &str, mappings: Mappings) -> Obfuscated {
        let substituted = substitute::apply(source, &mappings);
        let text = if self.engine.compact_whitespace {
            compact::compact(&substituted.text)
        } else {
            substituted.text
        };
        Obfuscated { text, mappings, replaced: substituted.replaced }
    }

    /// Obfuscate text that is already comment-stripped, using a given
    /// signature listing. `path` decides which signatures are local.
    pub fn obfuscate_source(&self, source: &str, signatures: &[Signature], path: &Path) -> Obfuscated {
        let mut names = self.registry();
        let mut mappings = harvest_source(source, &self.engine.keywords, &mut names);
        let classified = functions::classify(signatures, path, &mut names);
        mappings.local_functions = classified.local;
        mappings.library_functions = classified.library;
        self.rewrite(source, mappings)
    }

    /// Full run. Any collaborator failure aborts before the output file is
    /// written.
    pub async fn run(&self, input: &Path) -> Result<ObfuscationReport> {
        info!(input = %input.display(), "stripping comments");
        let source = self.source.strip_comments(input).await?;

        let mut names = self.registry();
        let mut mappings = harvest_source(&source, &self.engine.keywords, &mut names);

        info!("listing function signatures");
        let signatures = self.signatures.list_signatures(input).await?;
        let classified = functions::classify(&signatures, input, &mut names);
        mappings.local_functions = classified.local;
        mappings.library_functions = classified.library;

        let obfuscated = self.rewrite(&source, mappings);

        let seed = self.seed.fetch_seed().await?;
        let output = output_path(input, seed)?;
        tokio::fs::write(&output, &obfuscated.text).await?;
        info!(output = %output.display(), symbols = obfuscated.mappings.len(), "wrote obfuscated source");

        let symbols = Category::SUBSTITUTION_ORDER
            .into_iter()
            .map(|c| (c, obfuscated.mappings.table(c).len()))
            .collect();
        Ok(ObfuscationReport {
            input: input.to_path_buf(),
            output,
            seed,
            generated_at: Utc::now(),
            symbols,
            replaced: obfuscated.replaced,
            mappings: obfuscated.mappings,
        })
    }
}
