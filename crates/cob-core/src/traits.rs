//! External collaborators the pipeline awaits, one at a time.

use crate::error::Result;
use crate::types::Signature;
use async_trait::async_trait;
use std::path::Path;

/// Yields source text with comments removed and macros left unexpanded.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    async fn strip_comments(&self, path: &Path) -> Result<String>;
}

/// Lists every function declaration the compiler sees for a translation unit.
#[async_trait]
pub trait SignatureLister: Send + Sync {
    async fn list_signatures(&self, path: &Path) -> Result<Vec<Signature>>;
}

/// Supplies the numeric suffix for the output file name.
#[async_trait]
pub trait SeedProvider: Send + Sync {
    async fn fetch_seed(&self) -> Result<u32>;
}
