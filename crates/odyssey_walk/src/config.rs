//! Walk configuration.

use odyssey_core::{SeedSource, WalkSeed};
use serde::{Deserialize, Serialize};

/// How the next step is drawn from the applicable ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Every applicable step is equally likely; declared weights are ignored
    #[default]
    Uniform,
    /// Applicable steps are drawn in proportion to their weights
    Weighted,
}

/// Walk configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Seed for the selection RNG
    pub seed: WalkSeed,
    /// Selection strategy
    #[serde(default)]
    pub selection: Selection,
}

impl WalkConfig {
    /// Create a new walk config
    #[must_use]
    pub fn new(seed: WalkSeed) -> Self {
        Self {
            seed,
            selection: Selection::Uniform,
        }
    }

    /// Config seeded from `ODYSSEY_SEED`, or a fresh random seed if unset.
    ///
    /// Log the resulting seed so a failing run can be reproduced with
    /// `ODYSSEY_SEED=<seed>`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`WalkConfig::from_env`], reading the seed through `lookup`
    #[must_use]
    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Self {
        let source = SeedSource::from_lookup(lookup).unwrap_or(SeedSource::Random);
        Self::new(WalkSeed::new(source))
    }

    /// Set seed
    #[must_use]
    pub fn with_seed(mut self, seed: WalkSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Set selection strategy
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Draw in proportion to step weights
    #[must_use]
    pub fn weighted(self) -> Self {
        self.with_selection(Selection::Weighted)
    }
}
