use anyhow::Context;
use clap::Parser;
use cob_core::config::SeedSource;
use cob_core::{CobConfig, CobError};
use cob_engine::Obfuscator;
use cob_toolchain::{seed, GccToolchain};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "cob", version, about = "Obfuscate identifiers, macros and keywords in a C source file")]
pub struct Cli {
    /// C source file to obfuscate
    pub input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Compiler used for comment stripping and signature listing
    #[arg(long)]
    pub compiler: Option<String>,

    /// Draw the file name seed locally instead of from random.org
    #[arg(long)]
    pub offline_seed: bool,

    /// Seed for reproducible opaque names
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Keep line breaks and whitespace as substituted
    #[arg(long)]
    pub no_compact: bool,

    /// Write the symbol mappings and run summary as JSON
    #[arg(long, value_name = "PATH")]
    pub emit_map: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// File config overlaid with command-line flags.
    pub fn resolve_config(&self) -> cob_core::Result<CobConfig> {
        let mut config = match &self.config {
            Some(path) => CobConfig::from_json_file(path)?,
            None => CobConfig::default(),
        };
        if let Some(compiler) = &self.compiler {
            config.toolchain.compiler = compiler.clone();
        }
        if self.offline_seed {
            config.seed.source = SeedSource::Local;
        }
        if self.no_compact {
            config.engine.compact_whitespace = false;
        }
        config.validate()?;
        Ok(config)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let input = cli.input.clone().ok_or_else(|| {
        CobError::MissingArgument(
            "the C source file must be given on the command line, e.g. `cob example1.c`".into(),
        )
    })?;
    let config = cli.resolve_config()?;

    let toolchain = Arc::new(GccToolchain::from_config(&config.toolchain));
    let mut obfuscator = Obfuscator::new(toolchain.clone(), toolchain, seed::from_config(&config.seed))
        .with_engine_config(config.engine.clone());
    if let Some(rng_seed) = cli.rng_seed {
        obfuscator = obfuscator.with_rng_seed(rng_seed);
    }

    let report = obfuscator
        .run(&input)
        .await
        .with_context(|| format!("obfuscating {}", input.display()))?;
    info!(symbols = report.mappings.len(), "done");

    if let Some(path) = &cli.emit_map {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    println!("{}", report.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["cob", "prog.c", "--compiler", "clang", "--offline-seed", "--no-compact"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.toolchain.compiler, "clang");
        assert_eq!(config.seed.source, SeedSource::Local);
        assert!(!config.engine.compact_whitespace);
    }

    #[test]
    fn test_input_optional_at_parse_time() {
        let cli = Cli::parse_from(["cob"]);
        assert!(cli.input.is_none());
    }

    #[tokio::test]
    async fn test_missing_input_is_missing_argument() {
        let err = run(Cli::parse_from(["cob", "--offline-seed"])).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<CobError>(), Some(CobError::MissingArgument(_))));
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cob.json");
        std::fs::write(&path, r#"{"toolchain":{"compiler":"cc","extra_args":["-I."]}}"#).unwrap();
        let cli = Cli::parse_from(["cob", "prog.c", "--config", path.to_str().unwrap(), "--rng-seed", "9"]);
        assert_eq!(cli.rng_seed, Some(9));
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.toolchain.compiler, "cc");
        assert_eq!(config.toolchain.extra_args, vec!["-I."]);
        assert_eq!(config.seed.source, SeedSource::RandomOrg);
    }
}
