//! Unique name generator — opaque hexadecimal identifiers.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashSet;
use std::fmt::Write;

/// Random bytes per opaque name (two hex chars each).
pub const NAME_BYTES: usize = 4;
/// Random bytes drawn when re-rolling a leading digit.
const REROLL_BYTES: usize = 2;

/// Issues opaque names that are unique for the lifetime of the registry.
///
/// One registry belongs to one run; two runs never share issued names.
pub struct NameRegistry {
    rng: StdRng,
    issued: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible name sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng, issued: HashSet::new() }
    }

    /// Draw a fresh name: 8 lowercase hex chars, never starting with a digit,
    /// never returned before by this registry.
    pub fn generate(&mut self) -> String {
        loop {
            let raw = self.random_hex(NAME_BYTES);
            let candidate = self.non_numeric_first(raw);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.issued.contains(name)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    fn random_hex(&mut self, bytes: usize) -> String {
        let mut buf = vec![0u8; bytes];
        self.rng.fill_bytes(&mut buf);
        buf.iter().fold(String::with_capacity(bytes * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
    }

    fn non_numeric_first(&mut self, mut name: String) -> String {
        while name.starts_with(|c: char| c.is_ascii_digit()) {
            let lead = self.random_hex(REROLL_BYTES);
            name.replace_range(..1, &lead[..1]);
        }
        name
    }
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
