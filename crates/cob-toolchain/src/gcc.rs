//! GCC-backed comment stripping and signature listing.

use async_trait::async_trait;
use cob_core::config::ToolchainConfig;
use cob_core::{CobError, Result, Signature, SignatureLister, SourceProvider};
use regex::Regex;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Output;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::debug;

/// `/* <origin>:<line>:<flags> */ <declaration>`
static RE_AUX_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    r"^/\*\s*(.+?):\d+:[A-Z]*\s*\*/\s*(.+)$"
).unwrap());

/// Parse `-aux-info` output. The header and any line of another shape are
/// skipped.
pub fn parse_aux_info(text: &str) -> Vec<Signature> {
    text.lines()
        .filter_map(|line| RE_AUX_LINE.captures(line.trim()))
        .filter_map(|caps| Some(Signature::new(caps.get(2)?.as_str().trim(), caps.get(1)?.as_str())))
        .collect()
}

pub struct GccToolchain {
    compiler: String,
    extra_args: Vec<String>,
}

impl GccToolchain {
    pub fn new(compiler: impl Into<String>) -> Self {
        Self { compiler: compiler.into(), extra_args: Vec::new() }
    }

    pub fn from_config(config: &ToolchainConfig) -> Self {
        Self { compiler: config.compiler.clone(), extra_args: config.extra_args.clone() }
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    async fn invoke<I, S>(&self, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.compiler)
            .args(&self.extra_args)
            .args(args)
            .output()
            .await
            .map_err(|e| CobError::external(&self.compiler, format!("failed to spawn: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CobError::external(
                &self.compiler,
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }
        Ok(output)
    }
}

#[async_trait]
impl SourceProvider for GccToolchain {
    async fn strip_comments(&self, path: &Path) -> Result<String> {
        let output = self
            .invoke([OsStr::new("-fpreprocessed"), OsStr::new("-dD"), OsStr::new("-E"), OsStr::new("-P"), path.as_os_str()])
            .await?;
        let text = String::from_utf8(output.stdout)
            .map_err(|e| CobError::external(&self.compiler, format!("preprocessor output is not UTF-8: {e}")))?;
        debug!(bytes = text.len(), "stripped comments");
        Ok(text)
    }
}

#[async_trait]
impl SignatureLister for GccToolchain {
    async fn list_signatures(&self, path: &Path) -> Result<Vec<Signature>> {
        let scratch = tempfile::tempdir()?;
        let aux = scratch.path().join("functions.txt");
        let object = scratch.path().join("unit.o");
        self.invoke([
            OsStr::new("-aux-info"),
            aux.as_os_str(),
            OsStr::new("-c"),
            path.as_os_str(),
            OsStr::new("-o"),
            object.as_os_str(),
        ])
        .await?;
        let listing = tokio::fs::read_to_string(&aux)
            .await
            .map_err(|e| CobError::external(&self.compiler, format!("no aux-info listing: {e}")))?;
        let signatures = parse_aux_info(&listing);
        debug!(count = signatures.len(), "listed signatures");
        Ok(signatures)
    }
}
