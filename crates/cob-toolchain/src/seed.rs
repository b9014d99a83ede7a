//! Output file seed providers.

use async_trait::async_trait;
use cob_core::config::{SeedConfig, SeedSource};
use cob_core::{CobError, Result, SeedProvider};
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::debug;

/// Parse a seed service response body and check it against `range`.
pub fn parse_seed(body: &str, range: &RangeInclusive<u32>) -> Result<u32> {
    let value: u32 = body
        .trim()
        .parse()
        .map_err(|e| CobError::Seed(format!("unreadable seed {:?}: {e}", body.trim())))?;
    if !range.contains(&value) {
        return Err(CobError::Seed(format!(
            "seed {value} outside [{}, {}]",
            range.start(),
            range.end()
        )));
    }
    Ok(value)
}

/// True-random integer from random.org (atmospheric noise).
pub struct RandomOrgSeed {
    client: reqwest::Client,
    url: String,
    range: RangeInclusive<u32>,
}

impl RandomOrgSeed {
    pub fn new(url: impl Into<String>, range: RangeInclusive<u32>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into(), range }
    }
}

#[async_trait]
impl SeedProvider for RandomOrgSeed {
    async fn fetch_seed(&self) -> Result<u32> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CobError::Seed(format!("request failed: {e}")))?;
        let body = response
            .text()
            .await
            .map_err(|e| CobError::Seed(format!("unreadable response: {e}")))?;
        let seed = parse_seed(&body, &self.range)?;
        debug!(seed, "fetched seed");
        Ok(seed)
    }
}

/// Pseudo-random seed drawn locally, for offline runs.
pub struct LocalSeed {
    range: RangeInclusive<u32>,
}

impl LocalSeed {
    pub fn new(range: RangeInclusive<u32>) -> Self {
        Self { range }
    }
}

#[async_trait]
impl SeedProvider for LocalSeed {
    async fn fetch_seed(&self) -> Result<u32> {
        let seed = rand::thread_rng().gen_range(self.range.clone());
        Ok(seed)
    }
}

/// Provider selected by `config.source`.
pub fn from_config(config: &SeedConfig) -> Arc<dyn SeedProvider> {
    let range = config.min..=config.max;
    match config.source {
        SeedSource::RandomOrg => Arc::new(RandomOrgSeed::new(&config.url, range)),
        SeedSource::Local => Arc::new(LocalSeed::new(range)),
    }
}
