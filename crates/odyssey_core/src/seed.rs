//! Seed management for reproducible walks.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// Environment variable consulted by [`SeedSource::from_env`]
pub const SEED_ENV_VAR: &str = "ODYSSEY_SEED";

/// Source of a walk seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedSource {
    /// From a literal value
    Literal(u64),
    /// From a string (hashed)
    FromString(String),
    /// Random seed (non-deterministic)
    Random,
}

impl SeedSource {
    /// Generate a seed value
    #[must_use]
    pub fn to_seed(&self) -> u64 {
        match self {
            SeedSource::Literal(seed) => *seed,
            SeedSource::FromString(s) => {
                let mut hasher = fnv::FnvHasher::default();
                hasher.write(s.as_bytes());
                hasher.finish()
            }
            SeedSource::Random => {
                use std::time::SystemTime;
                SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default()
            }
        }
    }

    /// Parse a seed as given on the command line or in the environment.
    ///
    /// Digits become a literal; anything else is hashed.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<u64>() {
            Ok(seed) => SeedSource::Literal(seed),
            Err(_) => SeedSource::FromString(raw.to_string()),
        }
    }

    /// Read the seed from `ODYSSEY_SEED`, if set and non-empty
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the seed through `lookup`, which is asked for [`SEED_ENV_VAR`].
    ///
    /// Unset and blank values both yield `None`.
    #[must_use]
    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Option<Self> {
        lookup(SEED_ENV_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| Self::parse(&raw))
    }
}

/// Walk seed for reproducibility
///
/// The numeric value is resolved once at construction, so a `Random`
/// source still yields a seed that can be printed and fed back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSeed {
    /// Base seed value
    pub seed: u64,
    /// Source of the seed
    pub source: SeedSource,
}

impl WalkSeed {
    /// Create a new walk seed
    #[must_use]
    pub fn new(source: SeedSource) -> Self {
        let seed = source.to_seed();
        Self { seed, source }
    }

    /// Create a seed from a literal value
    #[must_use]
    pub fn from_literal(seed: u64) -> Self {
        Self::new(SeedSource::Literal(seed))
    }

    /// Create a seed from a string
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self::new(SeedSource::FromString(s.into()))
    }

    /// Create a fresh non-deterministic seed
    #[must_use]
    pub fn random() -> Self {
        Self::new(SeedSource::Random)
    }

    /// Derive a seed for a specific context
    #[must_use]
    pub fn derive(&self, context: &str) -> Self {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        Self::from_literal(hasher.finish())
    }

    /// Create RNG borrowing seed
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

impl Default for WalkSeed {
    fn default() -> Self {
        Self::from_literal(42)
    }
}

impl std::fmt::Display for WalkSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seed_source_literal() {
        let source = SeedSource::Literal(123);
        assert_eq!(source.to_seed(), 123);
    }

    #[test]
    fn test_seed_source_from_string_reproducible() {
        let source1 = SeedSource::FromString("nightly".to_string());
        let source2 = SeedSource::FromString("nightly".to_string());
        assert_eq!(source1.to_seed(), source2.to_seed());
    }

    #[test]
    fn test_seed_source_from_string_different() {
        let source1 = SeedSource::FromString("nightly".to_string());
        let source2 = SeedSource::FromString("weekly".to_string());
        assert_ne!(source1.to_seed(), source2.to_seed());
    }

    #[test]
    fn test_seed_source_parse() {
        assert_eq!(SeedSource::parse(" 17 "), SeedSource::Literal(17));
        assert_eq!(
            SeedSource::parse("bug-1234"),
            SeedSource::FromString("bug-1234".to_string())
        );
    }

    #[test]
    fn test_seed_source_from_lookup_unset() {
        assert!(SeedSource::from_lookup(|_| None).is_none());
    }

    #[test]
    fn test_seed_source_from_lookup_blank() {
        assert!(SeedSource::from_lookup(|_| Some(String::new())).is_none());
        assert!(SeedSource::from_lookup(|_| Some("  \t".to_string())).is_none());
    }

    #[test]
    fn test_seed_source_from_lookup_numeric() {
        let source = SeedSource::from_lookup(|key| {
            assert_eq!(key, SEED_ENV_VAR);
            Some("17".to_string())
        });
        assert_eq!(source, Some(SeedSource::Literal(17)));
    }

    #[test]
    fn test_seed_source_from_lookup_string() {
        let source = SeedSource::from_lookup(|_| Some("bug-1234".to_string()));
        assert_eq!(source, Some(SeedSource::FromString("bug-1234".to_string())));
    }

    #[test]
    fn test_walk_seed_derive() {
        let base = WalkSeed::from_literal(42);
        let derived1 = base.derive("walk-1");
        let derived2 = base.derive("walk-2");

        assert_ne!(derived1.seed, derived2.seed);
        assert_eq!(derived1.seed, base.derive("walk-1").seed);
        assert_ne!(derived1.seed, base.seed);
    }

    #[test]
    fn test_walk_seed_rng() {
        let seed = WalkSeed::from_literal(42);
        let val1: u64 = seed.rng().r#gen();
        let val2: u64 = seed.rng().r#gen();
        assert_eq!(val1, val2);
    }

    #[test]
    fn test_random_seed_is_resolved_once() {
        let seed = WalkSeed::random();
        let copy = WalkSeed::from_literal(seed.seed);
        let a: u64 = seed.rng().r#gen();
        let b: u64 = copy.rng().r#gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_walk_seed_default() {
        let seed = WalkSeed::default();
        assert_eq!(seed.seed, 42);
        assert_eq!(seed.to_string(), "42");
    }
}
