//! Registration table of named steps.

use crate::step::{Step, normalize_weight};
use indexmap::IndexMap;
use odyssey_core::{Params, WalkError, WalkResult};
use std::sync::Arc;

/// Entry for a registered step
pub struct Registration<C> {
    /// The step itself
    pub step: Arc<dyn Step<C>>,
    /// Selection weight, normalized at registration time
    pub weight: f64,
    /// Parameters used when an invocation supplies none
    pub default_params: Params,
}

impl<C> Registration<C>
where
    C: Send + Sync + 'static,
{
    /// Create a new registration
    #[must_use]
    pub fn new(step: Arc<dyn Step<C>>, default_params: Params) -> Self {
        let weight = normalize_weight(step.weight());
        Self {
            step,
            weight,
            default_params,
        }
    }

    /// Step name
    #[must_use]
    pub fn name(&self) -> &str {
        self.step.name()
    }
}

impl<C> Clone for Registration<C> {
    fn clone(&self) -> Self {
        Self {
            step: Arc::clone(&self.step),
            weight: self.weight,
            default_params: self.default_params.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Registration<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("weight", &self.weight)
            .field("default_params", &self.default_params)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered table of steps.
///
/// Names are unique and entries are never removed.
pub struct StepRegistry<C> {
    steps: IndexMap<String, Registration<C>>,
}

impl<C> StepRegistry<C>
where
    C: Send + Sync + 'static,
{
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: IndexMap::new(),
        }
    }

    /// Register a step
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::DuplicateStep`] if the name is taken; the
    /// table is left untouched.
    pub fn register(
        &mut self,
        step: Arc<dyn Step<C>>,
        default_params: Option<Params>,
    ) -> WalkResult<()> {
        let name = step.name().to_string();

        if self.steps.contains_key(&name) {
            return Err(WalkError::DuplicateStep { name });
        }

        let entry = Registration::new(step, default_params.unwrap_or_default());
        self.steps.insert(name, entry);
        Ok(())
    }

    /// Get a registration by name
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::UnknownStep`] if no step has this name
    pub fn get(&self, name: &str) -> WalkResult<&Registration<C>> {
        self.steps.get(name).ok_or_else(|| WalkError::UnknownStep {
            name: name.to_string(),
        })
    }

    /// Registrations whose predicate currently holds, in registration order
    #[must_use]
    pub fn applicable(&self) -> Vec<&Registration<C>> {
        self.steps
            .values()
            .filter(|entry| entry.step.is_applicable())
            .collect()
    }

    /// Iterate over all registrations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Registration<C>> {
        self.steps.values()
    }

    /// List all registered step names
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.steps.keys().cloned().collect()
    }

    /// Check if a step is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Get the count of registered steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<C> Default for StepRegistry<C>
where
    C: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
