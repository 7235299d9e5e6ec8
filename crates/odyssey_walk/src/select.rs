//! Seeded random selection among applicable steps.

use crate::config::{Selection, WalkConfig};
use crate::registry::Registration;
use odyssey_core::WalkSeed;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Draws the next step.
///
/// Two selectors built from the same seed and strategy make the same
/// choices for the same candidate lists.
#[derive(Debug, Clone)]
pub struct Selector {
    rng: ChaCha8Rng,
    selection: Selection,
}

impl Selector {
    /// Create a new selector
    #[must_use]
    pub fn new(seed: &WalkSeed, selection: Selection) -> Self {
        Self {
            rng: seed.rng(),
            selection,
        }
    }

    /// Create a selector from walk configuration
    #[must_use]
    pub fn from_config(config: &WalkConfig) -> Self {
        Self::new(&config.seed, config.selection)
    }

    /// Selection strategy in use
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Pick an index given candidate weights. `None` only for no candidates.
    pub fn pick_index(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let index = match self.selection {
            Selection::Weighted if weights.iter().sum::<f64>().is_finite() => {
                match WeightedIndex::<f64>::new(weights.iter().copied()) {
                    Ok(dist) => dist.sample(&mut self.rng),
                    Err(_) => self.rng.gen_range(0..weights.len()),
                }
            }
            // Weight sums that overflow to infinity degrade to uniform
            Selection::Weighted | Selection::Uniform => self.rng.gen_range(0..weights.len()),
        };
        Some(index)
    }

    /// Pick one of the candidate registrations
    pub fn pick<'r, C>(
        &mut self,
        candidates: &[&'r Registration<C>],
    ) -> Option<&'r Registration<C>> {
        let weights: Vec<f64> = candidates.iter().map(|entry| entry.weight).collect();
        self.pick_index(&weights).map(|index| candidates[index])
    }
}
