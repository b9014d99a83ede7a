use crate::error::{CobError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keywords aliased through `#define` when present in the source.
pub const DEFAULT_KEYWORDS: &[&str] = &["return", "for", "int", "if", "while", "void"];

pub const DEFAULT_SEED_URL: &str =
    "https://www.random.org/integers/?num=1&min=10000&max=99999&col=1&base=10&format=plain&rnd=new";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CobConfig {
    pub toolchain: ToolchainConfig,
    pub seed: SeedConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub compiler: String,
    /// Passed to every compiler invocation (include paths, defines).
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    RandomOrg,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub source: SeedSource,
    pub url: String,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub keywords: Vec<String>,
    pub compact_whitespace: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self { compiler: "gcc".into(), extra_args: Vec::new() }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source: SeedSource::RandomOrg,
            url: DEFAULT_SEED_URL.into(),
            min: 10000,
            max: 99999,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            compact_whitespace: true,
        }
    }
}

impl CobConfig {
    /// Load a config file; absent sections fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.toolchain.compiler.trim().is_empty() {
            return Err(CobError::Config("toolchain.compiler must not be empty".into()));
        }
        let five_digits = 10000..=99999;
        if !five_digits.contains(&self.seed.min) || !five_digits.contains(&self.seed.max) {
            return Err(CobError::Config(format!(
                "seed range [{}, {}] must stay within five digits",
                self.seed.min, self.seed.max
            )));
        }
        if self.seed.min > self.seed.max {
            return Err(CobError::Config(format!(
                "seed.min ({}) exceeds seed.max ({})",
                self.seed.min, self.seed.max
            )));
        }
        Ok(())
    }
}
